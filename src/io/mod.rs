pub mod input;
pub mod output;

pub use input::{parse_rttm_file, parse_rttm_str, parse_uem_file, parse_uem_str};
pub use output::{render_speaker_maps, render_table};
