//! txt2img workflow construction
//!
//! Builds the basic text-to-image node graph ComfyUI expects: checkpoint
//! loader, positive/negative CLIP encodes, an empty latent, a KSampler,
//! VAE decode, and a save node. Parameters arrive already structured;
//! extracting them from specialist chatter is out of scope here.

use serde_json::{Value, json};

/// Parameters for a text-to-image workflow
#[derive(Debug, Clone)]
pub struct Txt2ImgParams {
    pub prompt: String,
    pub negative_prompt: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub cfg: f64,
    /// Randomized at build time when unset.
    pub seed: Option<u64>,
    pub checkpoint: String,
    pub sampler: String,
}

impl Txt2ImgParams {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for Txt2ImgParams {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            negative_prompt: "ugly, blurry, low quality".to_string(),
            width: 1024,
            height: 1024,
            steps: 20,
            cfg: 7.0,
            seed: None,
            checkpoint: "sd_xl_base_1.0.safetensors".to_string(),
            sampler: "euler".to_string(),
        }
    }
}

/// Build a txt2img node graph from parameters.
pub fn build_txt2img_workflow(params: &Txt2ImgParams) -> Value {
    let seed = params.seed.unwrap_or_else(|| rand::random::<u32>() as u64);

    json!({
        "3": {
            "class_type": "KSampler",
            "inputs": {
                "seed": seed,
                "steps": params.steps,
                "cfg": params.cfg,
                "sampler_name": params.sampler,
                "scheduler": "normal",
                "denoise": 1.0,
                "model": ["4", 0],
                "positive": ["6", 0],
                "negative": ["7", 0],
                "latent_image": ["5", 0]
            }
        },
        "4": {
            "class_type": "CheckpointLoaderSimple",
            "inputs": { "ckpt_name": params.checkpoint }
        },
        "5": {
            "class_type": "EmptyLatentImage",
            "inputs": {
                "width": params.width,
                "height": params.height,
                "batch_size": 1
            }
        },
        "6": {
            "class_type": "CLIPTextEncode",
            "inputs": { "text": params.prompt, "clip": ["4", 1] }
        },
        "7": {
            "class_type": "CLIPTextEncode",
            "inputs": { "text": params.negative_prompt, "clip": ["4", 1] }
        },
        "8": {
            "class_type": "VAEDecode",
            "inputs": { "samples": ["3", 0], "vae": ["4", 2] }
        },
        "9": {
            "class_type": "SaveImage",
            "inputs": { "images": ["8", 0], "filename_prefix": "atelier" }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_wires_parameters_into_nodes() {
        let params = Txt2ImgParams::new("a fox in snow")
            .with_size(768, 1024)
            .with_seed(42);
        let workflow = build_txt2img_workflow(&params);

        assert_eq!(workflow["3"]["inputs"]["seed"], 42);
        assert_eq!(workflow["3"]["inputs"]["steps"], 20);
        assert_eq!(workflow["3"]["inputs"]["sampler_name"], "euler");
        assert_eq!(workflow["4"]["inputs"]["ckpt_name"], "sd_xl_base_1.0.safetensors");
        assert_eq!(workflow["5"]["inputs"]["width"], 768);
        assert_eq!(workflow["5"]["inputs"]["height"], 1024);
        assert_eq!(workflow["6"]["inputs"]["text"], "a fox in snow");
        assert_eq!(workflow["7"]["inputs"]["text"], "ugly, blurry, low quality");
    }

    #[test]
    fn unset_seed_is_randomized() {
        let params = Txt2ImgParams::new("anything");
        let workflow = build_txt2img_workflow(&params);
        assert!(workflow["3"]["inputs"]["seed"].is_u64());
    }
}
