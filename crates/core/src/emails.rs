//! Email helpers used by corporate signature matching.

/// Extract the domain part of an email address, lowercased.
///
/// Returns `None` when the input has no `@` or an empty domain.
pub fn email_domain(email: &str) -> Option<String> {
    let (_, domain) = email.rsplit_once('@')?;
    if domain.is_empty() {
        return None;
    }
    Some(domain.to_ascii_lowercase())
}

/// Collect the distinct, lowercased domains of a set of email addresses.
///
/// Addresses without a domain are skipped.
pub fn email_domains<'a, I>(emails: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut domains: Vec<String> = emails.into_iter().filter_map(email_domain).collect();
    domains.sort();
    domains.dedup();
    domains
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_domain() {
        assert_eq!(email_domain("rob@Example.COM"), Some("example.com".into()));
        assert_eq!(email_domain("no-at-sign"), None);
        assert_eq!(email_domain("trailing@"), None);
    }

    #[test]
    fn test_email_domains_dedup() {
        let domains = email_domains(["a@corp.io", "b@corp.io", "c@other.io"]);
        assert_eq!(domains, vec!["corp.io".to_string(), "other.io".to_string()]);
    }
}
