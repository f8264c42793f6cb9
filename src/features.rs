//! The feature bitmask controlling optional Creole grammar.

use bitflags::bitflags;

bitflags! {
    /// Optional grammar extensions beyond base Creole 1.0.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u8 {
        /// Plain Creole 1.0 with none of the extensions below.
        const BASE_1_0 = 0;
        /// Definition lists, indented blockquotes, `##` monospace.
        const ADDITIONS = 1 << 0;
        /// `?WxH` image sizing inside `{{...}}`.
        const IMAGESIZE = 1 << 1;
    }
}

impl Default for Features {
    fn default() -> Self {
        Features::ADDITIONS | Features::IMAGESIZE
    }
}
