use super::{App, Listener};
use crate::error::SetupError;
use crate::task::{Step, TimerTask};
use crate::typing::{Typewriter, TypingSpeeds, PHRASES};
use web_sys::Element;

const TARGET: &str = ".typing-text";
const TYPING_TIMER: &str = "typing";

struct TypingStep {
    writer: Typewriter,
    target: Element,
}

impl Step for TypingStep {
    fn step(&mut self) -> Option<u32> {
        let frame = self.writer.tick(js_sys::Math::random());
        self.target.set_text_content(Some(&frame.text));
        Some(frame.delay_ms)
    }
}

pub fn setup(app: &mut App) -> Result<(), SetupError> {
    let target: Element = app.lookup().one(TARGET)?;
    let config = app.config();
    let speeds = TypingSpeeds {
        typing_min_ms: config.typing_min_ms,
        typing_jitter_ms: config.typing_jitter_ms,
        deleting_ms: config.deleting_ms,
        full_phrase_pause_ms: config.full_phrase_pause_ms,
        next_phrase_pause_ms: config.next_phrase_pause_ms,
    };
    let writer = Typewriter::new(PHRASES, speeds).ok_or_else(|| SetupError::Config {
        message: "typing phrase list is empty".to_string(),
    })?;

    let task = TimerTask::new(TypingStep { writer, target });
    task.start(None);
    app.track_timer(TYPING_TIMER, task.clone());

    let document = app.document().clone();
    app.listen(Listener::new(app.document(), "visibilitychange", move |_| {
        if document.hidden() {
            task.pause();
        } else {
            task.resume();
        }
    })?);

    Ok(())
}
