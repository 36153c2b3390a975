//! Opening profile links in an external viewer, with a fallback when the
//! system handler is unavailable.

use std::{io, process::Command};

use shared::domain::User;
use thiserror::Error;
use tracing::warn;
use url::Url;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("invalid link '{url}': {reason}")]
    Invalid { url: String, reason: String },
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("'{program}' exited with {status}")]
    Exit { program: &'static str, status: String },
    #[error("failed to print link: {0}")]
    Print(#[from] io::Error),
}

pub trait LinkOpener {
    fn open(&self, url: &Url) -> Result<(), LinkError>;
}

/// Hands the URL to the platform's default handler.
pub struct SystemBrowser;

impl SystemBrowser {
    fn command(url: &Url) -> (&'static str, Command) {
        let (program, mut command) = if cfg!(target_os = "macos") {
            ("open", Command::new("open"))
        } else if cfg!(target_os = "windows") {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", ""]);
            ("cmd", command)
        } else {
            ("xdg-open", Command::new("xdg-open"))
        };
        command.arg(url.as_str());
        (program, command)
    }
}

impl LinkOpener for SystemBrowser {
    fn open(&self, url: &Url) -> Result<(), LinkError> {
        let (program, mut command) = Self::command(url);
        let status = command
            .status()
            .map_err(|source| LinkError::Launch { program, source })?;
        if status.success() {
            Ok(())
        } else {
            Err(LinkError::Exit {
                program,
                status: status.to_string(),
            })
        }
    }
}

/// Last resort: print the URL so the user can open it by hand.
pub struct PrintLink;

impl LinkOpener for PrintLink {
    fn open(&self, url: &Url) -> Result<(), LinkError> {
        use std::io::Write as _;
        writeln!(io::stdout().lock(), "{url}")?;
        Ok(())
    }
}

pub struct FallbackOpener<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackOpener<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: LinkOpener, S: LinkOpener> LinkOpener for FallbackOpener<P, S> {
    fn open(&self, url: &Url) -> Result<(), LinkError> {
        self.primary.open(url).or_else(|err| {
            warn!(%url, error = %err, "primary link opener failed; falling back");
            self.secondary.open(url)
        })
    }
}

pub fn default_opener() -> FallbackOpener<SystemBrowser, PrintLink> {
    FallbackOpener::new(SystemBrowser, PrintLink)
}

/// Accepts absolute http(s) URLs only.
pub fn parse_link(raw: &str) -> Result<Url, LinkError> {
    let invalid = |reason: String| LinkError::Invalid {
        url: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

pub fn open_link(opener: &impl LinkOpener, raw: &str) -> Result<(), LinkError> {
    opener.open(&parse_link(raw)?)
}

/// `website` selects the personal site; anything else is matched against
/// social platform names.
pub fn link_for<'a>(user: &'a User, target: &str) -> Option<&'a str> {
    if target.eq_ignore_ascii_case("website") {
        return user.social.website.as_deref();
    }
    user.social.profile(target).map(|p| p.url.as_str())
}
