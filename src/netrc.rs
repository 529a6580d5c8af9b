use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::Error;

/// A login/password pair read from the netrc file. Never written back.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// One `machine` entry (or the `default` entry) of a netrc file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Machine {
    pub login: Option<String>,
    pub password: Option<String>,
    pub account: Option<String>,
}

/// Parsed netrc file: named machines plus the optional `default` entry.
#[derive(Debug, Clone, Default)]
pub struct Netrc {
    machines: BTreeMap<String, Machine>,
    default: Option<Machine>,
}

impl Netrc {
    /// Parse netrc content. The format is a whitespace-separated token
    /// stream (`machine NAME`, `login V`, `password V`, `account V`,
    /// `default`); `macdef` bodies run until a blank line and are skipped.
    /// Unknown tokens are ignored, so parsing never fails.
    pub fn parse(content: &str) -> Netrc {
        let mut tokens: Vec<&str> = Vec::new();
        let mut in_macdef = false;

        for line in content.lines() {
            if in_macdef {
                if line.trim().is_empty() {
                    in_macdef = false;
                }
                continue;
            }
            for tok in line.split_whitespace() {
                if tok == "macdef" {
                    in_macdef = true;
                    break;
                }
                tokens.push(tok);
            }
        }

        enum Cur {
            None,
            Named(String),
            Default,
        }

        let mut netrc = Netrc::default();
        let mut cur = Cur::None;
        let mut it = tokens.into_iter();

        while let Some(tok) = it.next() {
            match tok {
                "machine" => {
                    if let Some(name) = it.next() {
                        netrc.machines.entry(name.to_string()).or_default();
                        cur = Cur::Named(name.to_string());
                    }
                }
                "default" => {
                    netrc.default.get_or_insert_with(Machine::default);
                    cur = Cur::Default;
                }
                "login" | "password" | "account" => {
                    let value = it.next();
                    let entry = match &cur {
                        Cur::Named(name) => netrc.machines.get_mut(name),
                        Cur::Default => netrc.default.as_mut(),
                        Cur::None => None,
                    };
                    if let (Some(entry), Some(value)) = (entry, value) {
                        let value = Some(value.to_string());
                        match tok {
                            "login" => entry.login = value,
                            "password" => entry.password = value,
                            _ => entry.account = value,
                        }
                    }
                }
                _ => {}
            }
        }

        netrc
    }

    /// Look up a machine by name, falling back to the `default` entry.
    pub fn machine(&self, name: &str) -> Option<&Machine> {
        self.machines.get(name).or(self.default.as_ref())
    }

    /// Credentials for `host`, requiring both login and password.
    pub fn credentials(&self, host: &str) -> Result<Credentials, Error> {
        let machine = self
            .machine(host)
            .ok_or_else(|| Error::Credential(format!("no netrc entry for machine '{host}'")))?;

        let login = machine
            .login
            .as_deref()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| Error::Credential(format!("netrc entry '{host}' has no login")))?;
        let password = machine
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::Credential(format!("netrc entry '{host}' has no password")))?;

        Ok(Credentials {
            login: login.to_string(),
            password: password.to_string(),
        })
    }
}

fn netrc_path() -> Result<PathBuf, Error> {
    dirs::home_dir()
        .map(|home| home.join(".netrc"))
        .ok_or_else(|| Error::Credential("could not locate home directory".to_string()))
}

/// Read `~/.netrc` and return the credentials stored for `host`.
pub fn user_credentials(host: &str) -> Result<Credentials, Error> {
    let path = netrc_path()?;
    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Credential(format!("failed to read {}: {e}", path.display())))?;
    Netrc::parse(&content).credentials(host)
}
