use clap::ValueEnum;

pub const DEFAULT_CRF: f64 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Codec {
    H264,
    Hqx,
}

impl Codec {
    pub fn profile(self, crf: f64) -> CodecProfile {
        match self {
            Codec::H264 => CodecProfile::H264 { crf },
            Codec::Hqx => CodecProfile::Hqx,
        }
    }
}

/// Output flags and container extension for one target codec.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CodecProfile {
    H264 { crf: f64 },
    /// DNxHR HQX, 10-bit 4:2:2.
    Hqx,
}

impl CodecProfile {
    pub fn output_args(&self) -> Vec<String> {
        let mut args: Vec<String> = match self {
            CodecProfile::H264 { crf } => vec![
                "-c:v".into(),
                "libx264".into(),
                "-profile:v".into(),
                "high".into(),
                "-crf".into(),
                crf.to_string(),
                "-preset".into(),
                "veryslow".into(),
                "-pix_fmt".into(),
                "yuv420p".into(),
                "-level".into(),
                "4.1".into(),
            ],
            CodecProfile::Hqx => vec![
                "-c:v".into(),
                "dnxhd".into(),
                "-profile:v".into(),
                "dnxhr_hqx".into(),
                "-pix_fmt".into(),
                "yuv422p10le".into(),
            ],
        };

        args.extend(["-an", "-movflags", "+faststart"].map(String::from));
        args
    }

    pub fn extension(&self) -> &'static str {
        match self {
            CodecProfile::H264 { .. } => ".mp4",
            CodecProfile::Hqx => ".mov",
        }
    }
}
