pub mod tts;
