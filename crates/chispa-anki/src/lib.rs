mod client;
mod note;

pub use client::AnkiConnectClient;
pub use note::note_payload;
