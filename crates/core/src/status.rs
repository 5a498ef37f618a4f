//! Commit status constants and sign-page URL building.
//!
//! The commit status posted to GitHub pull requests always uses the same
//! context so old statuses are overwritten rather than accumulated.

/// The commit status context attached to every pull request.
pub const COMMIT_STATUS_CONTEXT: &str = "license/cla";

/// Description used when the contributor has signed the agreement.
pub const SIGNED_DESCRIPTION: &str = "Contributor License Agreement is signed.";

/// Description used when the contributor has not signed the agreement.
pub const UNSIGNED_DESCRIPTION: &str =
    "Please sign the Contributor License Agreement!";

/// Build the URL of the individual sign page for an agreement.
///
/// `repository` and `pull_request_id` are threaded through as query
/// parameters so a successful signing can update the originating pull
/// request's commit status.
pub fn sign_url(
    base_url: &str,
    agreement_name: &str,
    repository: Option<&str>,
    pull_request_id: Option<i32>,
) -> String {
    let mut url = format!(
        "{}/sign/{}/icla",
        base_url.trim_end_matches('/'),
        agreement_name
    );
    if let (Some(repository), Some(pull_request_id)) = (repository, pull_request_id) {
        url.push_str(&format!(
            "?repository={repository}&pull_request_id={pull_request_id}"
        ));
    }
    url
}
