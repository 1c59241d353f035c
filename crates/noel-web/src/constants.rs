// DOM contract shared with the overlay markup and a few render tunables

pub const CANVAS_ID: &str = "app-canvas";

// Letter overlay
pub const SMALL_LETTER_ID: &str = "small-letter";
pub const OPENED_LETTER_ID: &str = "opened-letter";
pub const LETTER_PAPER_ID: &str = "letter-paper";
pub const LETTER_BACKDROP_ID: &str = "letter-backdrop";
pub const MESSAGE_PAGE_ID: &str = "message-page";
pub const MESSAGE_BACKDROP_ID: &str = "message-backdrop";

// Memory cards and the image modal
pub const MEMORIES_ID: &str = "memories";
pub const MEMORY_CARD_SELECTOR: &str = "[data-memory-id]";
pub const MEMORY_ID_ATTR: &str = "data-memory-id";
pub const IMAGE_MODAL_ID: &str = "image-modal";
pub const IMAGE_MODAL_IMG_ID: &str = "image-modal-img";
pub const IMAGE_MODAL_CLOSE_ID: &str = "image-modal-close";

pub const LETTER_STEP_ATTR: &str = "data-letter-step";
pub const HIDDEN_CLASS: &str = "hidden";
pub const OPENING_CLASS: &str = "opening"; // envelope animation on #opened-letter

// Black background, as in the greeting card
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];
