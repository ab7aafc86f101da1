//! Default job catalogs
//!
//! The stock BGM track and voice-line set, built as explicit job specs
//! from caller-supplied configuration rather than process-wide constants.

use mediagen_core::{AssetDirs, JobSpec};

/// Stock generation prompt for the BGM track.
pub const DEFAULT_BGM_PROMPT: &str = "Fast tempo, 8-bit, excited gaming music";

/// Rachel: clear, friendly voice.
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

/// Synthesis model identifier.
pub const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

/// Synthesis output encoding.
pub const DEFAULT_OUTPUT_FORMAT: &str = "mp3_44100_128";

/// Stock voice lines: (id, text).
pub const VOICE_LINES: &[(&str, &str)] = &[
    ("start", "Ready, Go!"),
    ("combo", "Unbelievable!"),
    ("gameover", "Game Over"),
];

/// Build the BGM job: instruct the agent to generate a track on suno.com
/// with the given prompt and download it as MP3.
#[must_use]
pub fn bgm_job(dirs: &AssetDirs, prompt: &str) -> JobSpec {
    let instruction = format!(
        "You are an assistant generating background music on Suno.com.\n\
         \n\
         Follow these steps:\n\
         1. Go to https://suno.com\n\
         2. If login is required, click \"Sign in with Google\"\n\
         3. Click the \"Create\" button to open the creation screen\n\
         4. Enter \"{prompt}\" into the prompt field\n\
         5. Click \"Create\" or \"Generate\" to start generation\n\
         6. Wait until generation finishes (it can take up to 3 minutes)\n\
         7. Find the download control for the generated track (the ... menu or a download icon)\n\
         8. Download it in MP3 format"
    );

    JobSpec::interactive("bgm", instruction, "mp3", dirs.target_for("bgm.mp3"))
}

/// Build the voice-line jobs for the stock line set.
#[must_use]
pub fn voice_jobs(
    dirs: &AssetDirs,
    voice_id: &str,
    model_id: &str,
    output_format: &str,
) -> Vec<JobSpec> {
    VOICE_LINES
        .iter()
        .map(|(id, text)| {
            JobSpec::synthesis(
                *id,
                *text,
                voice_id,
                model_id,
                output_format,
                dirs.target_for(format!("{id}.mp3")),
            )
        })
        .collect()
}
