//! Prompt templates for AI features

/// Marker placed before the quoted email
pub const EMAIL_START: &str = "---START OF EMAIL---";

/// Marker placed after the quoted email
pub const EMAIL_END: &str = "---END OF EMAIL---";

/// Instruction asking the model to draft a reply in `tone` to `email_text`.
///
/// The email is embedded verbatim between the start/end markers so the model
/// can tell the instruction apart from the quoted content.
pub fn reply_prompt(email_text: &str, tone: &str) -> String {
    format!(
        "Act as my executive assistant. Please craft a {tone} reply to this email: \n\n{EMAIL_START}\n{email_text}\n{EMAIL_END}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_prompt_layout() {
        let prompt = reply_prompt("Can we reschedule to Friday?", "friendly");
        assert_eq!(
            prompt,
            "Act as my executive assistant. Please craft a friendly reply to this email: \n\n\
             ---START OF EMAIL---\nCan we reschedule to Friday?\n---END OF EMAIL---"
        );
    }

    #[test]
    fn test_email_kept_verbatim() {
        let email = "  Hi,\n\nsee below\n> quoted\n";
        let prompt = reply_prompt(email, "formal");
        let start = prompt.find(EMAIL_START).unwrap() + EMAIL_START.len() + 1;
        let end = prompt.rfind(EMAIL_END).unwrap() - 1;
        assert_eq!(&prompt[start..end], email);
    }
}
