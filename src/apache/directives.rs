// Directive scanning - line-anchored extraction of Apache directive values

use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Apache directives the audit cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Include,
    SslCertificateFile,
    SslCertificateKeyFile,
}

lazy_static! {
    // Keyword must start the line (after optional whitespace) and be followed by
    // blanks, so `#Include` and `IncludeOptional` never match. The value stops
    // at a double quote or end of line.
    static ref INCLUDE_RE: Regex =
        Regex::new(r#"(?m)^[[:space:]]*Include[ \t]+"?([^\n"]+)"?"#).unwrap();
    static ref SSL_CERTIFICATE_FILE_RE: Regex =
        Regex::new(r#"(?m)^[[:space:]]*SSLCertificateFile[ \t]+"?([^\n"]+)"?"#).unwrap();
    static ref SSL_CERTIFICATE_KEY_FILE_RE: Regex =
        Regex::new(r#"(?m)^[[:space:]]*SSLCertificateKeyFile[ \t]+"?([^\n"]+)"?"#).unwrap();
}

impl Directive {
    /// Directive keyword as written in httpd configuration
    pub fn keyword(&self) -> &'static str {
        match self {
            Directive::Include => "Include",
            Directive::SslCertificateFile => "SSLCertificateFile",
            Directive::SslCertificateKeyFile => "SSLCertificateKeyFile",
        }
    }

    fn regex(&self) -> &'static Regex {
        match self {
            Directive::Include => &INCLUDE_RE,
            Directive::SslCertificateFile => &SSL_CERTIFICATE_FILE_RE,
            Directive::SslCertificateKeyFile => &SSL_CERTIFICATE_KEY_FILE_RE,
        }
    }

    /// All values of this directive in `content`, in textual order
    pub fn find_all<'a>(&self, content: &'a str) -> Vec<&'a str> {
        self.regex()
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim_end())
            .filter(|value| !value.is_empty())
            .collect()
    }
}

/// Resolve a directive value against the installation root
///
/// Absolute paths pass through untouched, relative ones are joined onto
/// `install_root`.
pub fn resolve_path(value: &str, install_root: &Path) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        install_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_quoted_and_unquoted() {
        let content = "ServerRoot \"/opt/bitnami/apache2\"\n\
                       Include conf/extra/httpd-ssl.conf\n\
                       \tInclude \"conf/bitnami/bitnami.conf\"\n";

        let includes = Directive::Include.find_all(content);
        assert_eq!(
            includes,
            vec!["conf/extra/httpd-ssl.conf", "conf/bitnami/bitnami.conf"]
        );
    }

    #[test]
    fn test_commented_and_prefixed_directives_ignored() {
        let content = "#Include conf/disabled.conf\n\
                       IncludeOptional conf/optional/*.conf\n\
                       # SSLCertificateFile old.pem\n";

        assert!(Directive::Include.find_all(content).is_empty());
        assert!(Directive::SslCertificateFile.find_all(content).is_empty());
    }

    #[test]
    fn test_keyword_matches_recognized_directive() {
        for directive in [
            Directive::Include,
            Directive::SslCertificateFile,
            Directive::SslCertificateKeyFile,
        ] {
            let line = format!("{} conf/value.conf\n", directive.keyword());
            assert_eq!(directive.find_all(&line), vec!["conf/value.conf"]);
        }
    }

    #[test]
    fn test_keyword_is_case_sensitive() {
        let content = "include conf/lower.conf\nINCLUDE conf/upper.conf\n";
        assert!(Directive::Include.find_all(content).is_empty());
    }

    #[test]
    fn test_cert_and_key_directives_are_distinct() {
        let content = "  SSLCertificateFile \"ssl/cert.pem\"\n  SSLCertificateKeyFile \"ssl/key.pem\"\n";

        assert_eq!(
            Directive::SslCertificateFile.find_all(content),
            vec!["ssl/cert.pem"]
        );
        assert_eq!(
            Directive::SslCertificateKeyFile.find_all(content),
            vec!["ssl/key.pem"]
        );
    }

    #[test]
    fn test_trailing_whitespace_and_crlf_trimmed() {
        let content = "SSLCertificateFile ssl/server.crt   \r\n";
        assert_eq!(
            Directive::SslCertificateFile.find_all(content),
            vec!["ssl/server.crt"]
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        let resolved = resolve_path("ssl/cert.pem", Path::new("testdata/apache2/"));
        assert_eq!(resolved, PathBuf::from("testdata/apache2/ssl/cert.pem"));
    }

    #[test]
    fn test_resolve_absolute_path_unchanged() {
        let resolved = resolve_path("/etc/ssl/cert.pem", Path::new("/opt/bitnami/apache2"));
        assert_eq!(resolved, PathBuf::from("/etc/ssl/cert.pem"));
    }
}
