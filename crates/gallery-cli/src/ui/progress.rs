//! Progress indicators for long-running operations.

use std::io::{self, Write};

use super::context::UiContext;
use super::render::badge;
use super::theme::{Badge, Theme};

/// A spinner for indeterminate progress.
pub struct Spinner<'a> {
    ctx: &'a UiContext,
    message: String,
    frame: usize,
}

impl<'a> Spinner<'a> {
    /// Create a new spinner with the given message.
    pub fn new(ctx: &'a UiContext, message: &str) -> Self {
        Self {
            ctx,
            message: message.to_string(),
            frame: 0,
        }
    }

    /// Start the spinner (prints initial line).
    pub fn start(&self) {
        if !self.ctx.allows_animation() {
            // Non-TTY: print static message
            println!("{}...", self.message);
            return;
        }
        self.render();
    }

    /// Advance to next frame (call this in a loop for animation).
    pub fn tick(&mut self) {
        if !self.ctx.allows_animation() {
            return;
        }
        let theme = Theme::default();
        let frames = theme.spinner_frames(self.ctx.unicode);
        self.frame = (self.frame + 1) % frames.len();
        self.render();
    }

    /// Render current spinner state.
    fn render(&self) {
        if !self.ctx.allows_animation() {
            return;
        }
        let theme = Theme::default();
        let frames = theme.spinner_frames(self.ctx.unicode);
        let frame_char = frames[self.frame];

        // Clear line and render
        print!("\r\x1b[K{} {}...", frame_char, self.message);
        let _ = io::stdout().flush();
    }

    /// Finish spinner with success message.
    pub fn finish(&self, message: &str) {
        if self.ctx.allows_animation() {
            print!("\r\x1b[K");
            let _ = io::stdout().flush();
        }
        println!("{}", badge(self.ctx, Badge::Ok, message));
    }

    /// Finish spinner with error message.
    pub fn finish_err(&self, message: &str) {
        if self.ctx.allows_animation() {
            print!("\r\x1b[K");
            let _ = io::stdout().flush();
        }
        eprintln!("{}", badge(self.ctx, Badge::Err, message));
    }

    /// Clear the spinner line without printing a status.
    pub fn clear(&self) {
        if self.ctx.allows_animation() {
            print!("\r\x1b[K");
            let _ = io::stdout().flush();
        }
    }
}
