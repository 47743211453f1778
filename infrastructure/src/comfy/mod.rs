//! ComfyUI adapter for the image queue port

pub mod client;
pub mod workflow;

pub use client::ComfyClient;
pub use workflow::{Txt2ImgParams, build_txt2img_workflow};
