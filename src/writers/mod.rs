pub mod exiftool;
