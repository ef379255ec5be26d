pub mod stdin_clipboard;
