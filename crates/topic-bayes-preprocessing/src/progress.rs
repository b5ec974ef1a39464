use std::borrow::Cow;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar shared by the batch operations of both crates.
#[must_use]
pub fn progress_bar(len: usize, message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("static progress template is valid")
            .progress_chars("#>-"),
    );
    pb.set_message(message);
    pb
}
