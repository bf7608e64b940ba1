use std::io::Write;

use async_trait::async_trait;
use chispa_core::{Choice, ChoiceRequest, Interaction};
use chispa_types::CardEvent;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::choice::{Parsed, parse_choice, prompt};
use crate::render::{meanings, render};
use crate::signal::Interrupts;

/// Prompts on stdout, reads stdin; Ctrl+C or end of input cancels
pub struct TerminalInteraction {
    lines: Lines<BufReader<Stdin>>,
    interrupts: Interrupts,
    removed: Option<usize>,
}

impl TerminalInteraction {
    pub fn new(interrupts: Interrupts) -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            interrupts,
            removed: None,
        }
    }

    /// Lines dropped from the batch file, once it was rewritten
    pub fn removed(&self) -> Option<usize> {
        self.removed
    }

    async fn read_line(&mut self, message: &str) -> Option<String> {
        print!("{message}");
        let _ = std::io::stdout().flush();

        match self.interrupts.prompt(self.lines.next_line()).await {
            Some(Ok(Some(line))) => Some(line),
            Some(Ok(None)) => {
                tracing::debug!("stdin closed");
                println!();
                None
            }
            Some(Err(e)) => {
                tracing::warn!("Failed to read stdin: {}", e);
                None
            }
            None => {
                println!();
                None
            }
        }
    }
}

#[async_trait]
impl Interaction for TerminalInteraction {
    async fn choose(&mut self, request: ChoiceRequest<'_>) -> Choice {
        let count = request.result.meanings.len();
        print!("{}", meanings(request.result, request.language));

        loop {
            let Some(input) = self.read_line(&prompt(count, request.allow_skip)).await else {
                return Choice::Interrupt;
            };

            match parse_choice(&input, count, request.allow_skip) {
                Parsed::Choice(choice) => return choice,
                Parsed::AskHint => {
                    let hint = self
                        .read_line("Enter hint (e.g., 'vulgar meaning', 'slang', 'formal'): ")
                        .await;
                    return match hint {
                        Some(hint) => Choice::Retry(hint.trim().to_string()),
                        None => Choice::Interrupt,
                    };
                }
                Parsed::Invalid(usage) => println!("{usage}"),
            }
        }
    }

    fn emit(&mut self, event: CardEvent) {
        if let CardEvent::Checkpointed { removed } = event {
            self.removed = Some(removed);
        }
        if let Some(line) = render(&event) {
            println!("{line}");
        }
    }
}
