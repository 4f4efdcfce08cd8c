use crate::ChatMessage;

/// Messages loaded from storage before windowing.
pub const HISTORY_FETCH_LIMIT: i64 = 20;

/// Messages from the history that are replayed to the model.
pub const CONTEXT_WINDOW: usize = 10;

pub const TAX_ASSISTANT_SYSTEM_MESSAGE: &str = "\
You are MyCA AI Tax Assistant, an expert Chartered Accountant specializing in Indian taxation. You provide professional advice on:

1. **Income Tax Returns (ITR)**: Filing guidance, tax slabs, deductions under 80C, 80D, HRA exemptions, capital gains
2. **GST Returns**: GSTR-1, GSTR-3B filing, input tax credit, GST rates, compliance
3. **Tax Planning & Savings**: Legal tax-saving strategies, investment options (ELSS, PPF, NPS), HRA optimization
4. **Business Taxation**: For proprietors, partnerships, companies - TDS, advance tax, professional tax
5. **Compliance**: Due dates, penalties, notices handling

Guidelines:
- Always provide accurate, up-to-date information based on Indian tax laws
- Suggest legal tax-saving methods only
- Recommend consulting a CA for complex situations
- Be helpful, professional, and explain concepts clearly
- Use examples with INR amounts when helpful";

/// The trailing `size` messages of a chronologically ordered history.
pub fn context_window(
    history: &[ChatMessage],
    size: usize,
) -> &[ChatMessage] {
    &history[history.len().saturating_sub(size)..]
}

/// Folds the recent conversation into the prompt sent with a new question.
///
/// Without prior messages the question is sent as-is.
pub fn build_prompt(
    history: &[ChatMessage],
    question: &str,
) -> String {
    let window = context_window(history, CONTEXT_WINDOW);
    if window.is_empty() {
        return question.to_string();
    }

    let transcript = window
        .iter()
        .map(|m| format!("{}: {}", m.role.as_str().to_uppercase(), m.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!("Previous conversation:\n{transcript}\n\nUser's new question: {question}")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ChatRole;

    fn message(
        n: usize,
        role: ChatRole,
    ) -> ChatMessage {
        ChatMessage {
            id: format!("m{n}"),
            session_id: "s1".to_string(),
            role,
            content: format!("message {n}"),
            timestamp: Utc.timestamp_opt(1_700_000_000 + n as i64, 0).unwrap(),
        }
    }

    fn history(len: usize) -> Vec<ChatMessage> {
        (0..len)
            .map(|n| {
                let role = if n % 2 == 0 { ChatRole::User } else { ChatRole::Assistant };
                message(n, role)
            })
            .collect()
    }

    #[test]
    fn context_window_keeps_most_recent_messages() {
        let history = history(15);

        let window = context_window(&history, CONTEXT_WINDOW);

        assert_eq!(window.len(), 10);
        assert_eq!(window[0].id, "m5");
        assert_eq!(window[9].id, "m14");
    }

    #[test]
    fn context_window_returns_short_history_whole() {
        let history = history(3);

        assert_eq!(context_window(&history, CONTEXT_WINDOW).len(), 3);
    }

    #[test]
    fn build_prompt_without_history_is_the_question() {
        assert_eq!(build_prompt(&[], "What is 80C?"), "What is 80C?");
    }

    #[test]
    fn build_prompt_prefixes_transcript() {
        let history = history(2);

        let prompt = build_prompt(&history, "And 80D?");

        assert_eq!(
            prompt,
            "Previous conversation:\n\
             USER: message 0\n\
             ASSISTANT: message 1\n\
             \n\
             User's new question: And 80D?"
        );
    }

    #[test]
    fn build_prompt_only_replays_the_window() {
        let history = history(12);

        let prompt = build_prompt(&history, "next");

        assert!(!prompt.contains("message 1\n"));
        assert!(prompt.contains("USER: message 2\n"));
        assert!(prompt.contains("ASSISTANT: message 11\n"));
    }
}
