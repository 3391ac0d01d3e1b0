use futures::channel::oneshot;
use futures::future::{BoxFuture, FutureExt};

pub const MISSING_KEY_REPLY: &str = "API Key is missing. Please configure your environment.";
pub const UNAVAILABLE_REPLY: &str =
    "The winds of the harbor interfere with my voice. Please try again later.";
pub const EMPTY_REPLY: &str = "I am currently lost in thought. Please ask again.";

pub const GREETING: &str = "Welcome to Liberty Island. I am the spirit of the statue. \
Ask me about my history, my torch, or the harbor.";

/// Text-completion service answering questions about the monument.
///
/// Implementations never fail from the caller's point of view: every error
/// resolves to one of the fixed replies above.
pub trait Assistant: Send {
    fn ask(&self, question: String, context: Option<String>) -> BoxFuture<'static, String>;
}

/// Persona and framing sent alongside every question
pub fn system_instruction(context: Option<&str>) -> String {
    let mut text = String::from(
        "You are the spirit of the Statue of Liberty, an expert historian and guide. \
You speak with a tone of dignity, enlightenment, and warmth. \
Keep answers concise (under 100 words) but poetic and informative. \
Focus on the history, construction (Bartholdi, Eiffel), and symbolism of the monument. \
Context: The user is viewing a 3D simulation of you.",
    );
    if let Some(focus) = context.filter(|c| !c.trim().is_empty()) {
        text.push_str(" Current focus: ");
        text.push_str(focus);
    }
    text
}

/// Resolve to the received reply, or the apology if the sender went away
pub fn from_channel(receiver: oneshot::Receiver<String>) -> BoxFuture<'static, String> {
    receiver
        .map(|reply| {
            reply.unwrap_or_else(|_| {
                log::warn!("Assistant reply channel closed without an answer");
                UNAVAILABLE_REPLY.to_string()
            })
        })
        .boxed()
}

/// Run a blocking job on its own thread and deliver its result as a future
pub fn spawn_reply<F>(name: &str, job: F) -> BoxFuture<'static, String>
where
    F: FnOnce() -> String + Send + 'static,
{
    let (sender, receiver) = oneshot::channel();
    let spawned = std::thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            // The session may have been dropped; nobody to tell then
            let _ = sender.send(job());
        });

    match spawned {
        Ok(_) => from_channel(receiver),
        Err(e) => {
            log::error!("Failed to spawn {} thread: {}", name, e);
            futures::future::ready(UNAVAILABLE_REPLY.to_string()).boxed()
        }
    }
}
