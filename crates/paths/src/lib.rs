mod classifier;
mod error;
mod helpers;
mod tokenizer;

pub use classifier::{Classification, classify_as_directory, classify_as_file};
pub use error::PathError;
pub use helpers::{
    add_trailing_separator, adjust_path_slash, ends_with_separator, join_paths,
    last_path_element, make_absolute, split_name_and_ext, split_path_and_file_name,
    strip_trailing_separator,
};
pub use tokenizer::{PathTokens, is_content_char, is_separator, volume_name};
