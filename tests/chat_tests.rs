use futures::future::{BoxFuture, FutureExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use liberty_lens::chat::{
    Assistant, ChatSession, GeminiAssistant, LibertyPart, Role, MISSING_KEY_REPLY,
    UNAVAILABLE_REPLY,
};
use liberty_lens::config::AssistantConfig;

/// Answers immediately and counts how often it was asked
#[derive(Clone, Default)]
struct Counting {
    calls: Arc<AtomicUsize>,
}

impl Assistant for Counting {
    fn ask(&self, question: String, context: Option<String>) -> BoxFuture<'static, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let focus = context.unwrap_or_else(|| "none".to_string());
        futures::future::ready(format!("{} ({})", question, focus)).boxed()
    }
}

/// Drops the reply channel without answering
struct Vanishing;

impl Assistant for Vanishing {
    fn ask(&self, _question: String, _context: Option<String>) -> BoxFuture<'static, String> {
        let (sender, receiver) = futures::channel::oneshot::channel::<String>();
        drop(sender);
        liberty_lens::chat::from_channel(receiver)
    }
}

#[cfg(test)]
mod chat_tests {
    use super::*;

    #[test]
    fn test_blank_input_never_reaches_assistant() {
        let assistant = Counting::default();
        let calls = assistant.calls.clone();
        let mut session = ChatSession::new(Box::new(assistant));

        assert!(!session.submit("", None));
        assert!(!session.submit("  \n\t", Some(LibertyPart::Crown)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_question_and_reply_in_order() {
        let mut session = ChatSession::new(Box::new(Counting::default()));

        assert!(session.submit("How tall is it?", Some(LibertyPart::Torch)));
        assert!(session.poll());

        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].text, "How tall is it? (Torch)");
        assert!(messages
            .windows(2)
            .all(|pair| pair[0].timestamp < pair[1].timestamp));
        assert!(!session.is_pending());
    }

    #[test]
    fn test_cancelled_reply_unblocks_input() {
        let mut session = ChatSession::new(Box::new(Vanishing));

        assert!(session.submit("Hello?", None));
        assert!(session.poll());
        assert_eq!(session.messages().last().unwrap().text, UNAVAILABLE_REPLY);
        assert!(!session.is_pending());
        assert!(session.submit("Still there?", None));
    }

    #[test]
    fn test_missing_key_reply_through_session() {
        let config = AssistantConfig::from_lookup(|_| None);
        let mut session = ChatSession::new(Box::new(GeminiAssistant::new(config)));

        assert!(session.submit("Who designed you?", None));
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while !session.poll() {
            assert!(std::time::Instant::now() < deadline, "reply never arrived");
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(session.messages().last().unwrap().text, MISSING_KEY_REPLY);
    }
}
