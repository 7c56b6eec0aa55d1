mod notes_widget;

pub use notes_widget::*;
