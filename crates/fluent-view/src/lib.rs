//! fluent-view: toolkit-independent view decoration and keyboard-aware scrolling.

pub mod decoration;
pub mod keyboard;

pub use decoration::{
    Decoration, LayerName, Mask, MaskProvider, Shadow, ShapeLayer, UniformBorder,
};
pub use keyboard::{
    InputId, InputKind, InputNode, KeyboardEvent, KeyboardScroll, ReturnAction, ReturnKey,
    ScrollAdjustment,
};
