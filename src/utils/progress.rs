use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner-style feedback for pipeline stages. The pipeline is a single
/// synchronous pass, so stage progress is a message update rather than a
/// position counter.
pub struct StageReporter {
    spinner: Option<ProgressBar>,
    silent: bool,
}

impl StageReporter {
    pub fn new(message: &str, silent: bool) -> Self {
        if silent {
            return Self {
                spinner: None,
                silent: true,
            };
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            spinner: Some(pb),
            silent: false,
        }
    }

    pub fn stage(&self, message: &str) {
        if let Some(ref pb) = self.spinner {
            pb.set_message(message.to_string());
        }
    }

    pub fn finish_with_message(&self, message: &str) {
        if let Some(ref pb) = self.spinner {
            pb.finish_with_message(message.to_string());
        }
    }

    pub fn println(&self, message: &str) {
        if self.silent {
            return;
        }
        match self.spinner {
            Some(ref pb) => pb.println(message),
            None => println!("{}", message),
        }
    }
}

impl Drop for StageReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.spinner {
            pb.finish();
        }
    }
}
