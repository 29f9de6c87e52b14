use super::CandidatePost;

const ID_PREFIX: &str = "(ID: ";

/// Format a post as `"<title>[ [<status>]] (ID: <id>)"`.
///
/// The status annotation is only present for posts that are not published.
#[must_use]
pub fn format_label(post: &CandidatePost) -> String {
	let title = post.display_title();
	if post.is_published() {
		format!("{title} (ID: {})", post.id)
	} else {
		format!("{title} [{}] (ID: {})", post.status, post.id)
	}
}

/// Recover the identifier from the trailing `(ID: <digits>)` of a token.
#[must_use]
pub fn extract_post_id(token: &str) -> Option<u64> {
	let body = token.strip_suffix(')')?;
	let start = body.rfind(ID_PREFIX)?;
	let digits = &body[start + ID_PREFIX.len()..];
	if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
		return None;
	}
	digits.parse().ok()
}
