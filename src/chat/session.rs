use futures::future::{BoxFuture, FutureExt};
use std::task::{Context, Poll};
use std::time::Instant;

use super::assistant::{Assistant, GREETING};
use super::message::{ChatMessage, LibertyPart, Role};

/// Conversation with the assistant, at most one question in flight
pub struct ChatSession {
    assistant: Box<dyn Assistant>,
    messages: Vec<ChatMessage>,
    pending: Option<BoxFuture<'static, String>>,
    started: Instant,
    next_id: u64,
}

impl ChatSession {
    pub fn new(assistant: Box<dyn Assistant>) -> Self {
        let mut session = Self {
            assistant,
            messages: Vec::new(),
            pending: None,
            started: Instant::now(),
            next_id: 0,
        };
        session.push(Role::Assistant, GREETING.to_string());
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn push(&mut self, role: Role, text: String) {
        let now = self.started.elapsed().as_millis() as u64;
        let timestamp = match self.messages.last() {
            Some(last) => now.max(last.timestamp + 1),
            None => now,
        };
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id: format!("msg-{}", self.next_id),
            role,
            text,
            timestamp,
        });
    }

    /// Send a question; returns false when it was blank or a reply is still due
    pub fn submit(&mut self, input: &str, focus: Option<LibertyPart>) -> bool {
        if input.trim().is_empty() || self.is_pending() {
            return false;
        }

        self.push(Role::User, input.to_string());
        let context = focus.map(|part| part.to_string());
        self.pending = Some(self.assistant.ask(input.to_string(), context));
        true
    }

    /// Check the outstanding reply without blocking; call once per frame.
    ///
    /// Returns true when a reply was appended.
    pub fn poll(&mut self) -> bool {
        let Some(reply) = self.pending.as_mut() else {
            return false;
        };

        let mut cx = Context::from_waker(futures::task::noop_waker_ref());
        match reply.poll_unpin(&mut cx) {
            Poll::Ready(text) => {
                self.pending = None;
                self.push(Role::Assistant, text);
                true
            }
            Poll::Pending => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::assistant::{from_channel, UNAVAILABLE_REPLY};
    use futures::channel::oneshot;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Echo {
        calls: Arc<AtomicUsize>,
        contexts: Arc<Mutex<Vec<Option<String>>>>,
    }

    impl Assistant for Echo {
        fn ask(&self, question: String, context: Option<String>) -> BoxFuture<'static, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.contexts.lock().unwrap().push(context);
            futures::future::ready(format!("echo: {}", question)).boxed()
        }
    }

    /// Hands out replies the test resolves by hand
    #[derive(Clone, Default)]
    struct Manual {
        senders: Arc<Mutex<Vec<oneshot::Sender<String>>>>,
    }

    impl Assistant for Manual {
        fn ask(&self, _question: String, _context: Option<String>) -> BoxFuture<'static, String> {
            let (sender, receiver) = oneshot::channel();
            self.senders.lock().unwrap().push(sender);
            from_channel(receiver)
        }
    }

    #[test]
    fn test_starts_with_greeting() {
        let session = ChatSession::new(Box::new(Echo::default()));
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::Assistant);
        assert_eq!(session.messages()[0].text, GREETING);
        assert!(!session.is_pending());
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let echo = Echo::default();
        let mut session = ChatSession::new(Box::new(echo.clone()));
        assert!(!session.submit("", None));
        assert!(!session.submit("   \t", None));
        assert_eq!(session.messages().len(), 1);
        assert_eq!(echo.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_round_trip_appends_user_then_assistant() {
        let echo = Echo::default();
        let mut session = ChatSession::new(Box::new(echo.clone()));

        assert!(session.submit("When were you dedicated?", Some(LibertyPart::Torch)));
        assert!(session.is_pending());
        assert!(session.poll());
        assert!(!session.is_pending());

        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].text, "When were you dedicated?");
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].text, "echo: When were you dedicated?");
        assert!(messages.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(echo.contexts.lock().unwrap()[0].as_deref(), Some("Torch"));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut session = ChatSession::new(Box::new(Echo::default()));
        for i in 0..5 {
            session.submit(&format!("question {}", i), None);
            session.poll();
        }
        let mut ids: Vec<&str> = session.messages().iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 11);
    }

    #[test]
    fn test_second_question_rejected_while_pending() {
        let manual = Manual::default();
        let mut session = ChatSession::new(Box::new(manual.clone()));

        assert!(session.submit("first", None));
        assert!(!session.submit("second", None));
        assert!(!session.poll());
        assert_eq!(session.messages().len(), 2);

        let sender = manual.senders.lock().unwrap().pop().unwrap();
        sender.send("answer".into()).unwrap();
        assert!(session.poll());
        assert_eq!(session.messages().last().unwrap().text, "answer");
        assert!(session.submit("second", None));
    }

    #[test]
    fn test_cancelled_reply_clears_pending() {
        let manual = Manual::default();
        let mut session = ChatSession::new(Box::new(manual.clone()));

        session.submit("Are you there?", None);
        manual.senders.lock().unwrap().clear();

        assert!(session.poll());
        assert!(!session.is_pending());
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[2].text, UNAVAILABLE_REPLY);
        // exactly one assistant reply per question
        assert!(!session.poll());
        assert_eq!(session.messages().len(), 3);
    }
}
