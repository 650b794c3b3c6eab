use bedrock_primitives::BedrockOutput;

use super::{porcelain_field, Formattable};

impl Formattable for BedrockOutput {
    fn format_porcelain(&self) -> String {
        [
            porcelain_field("output_root", self.output_root),
            porcelain_field("l1_timestamp", self.l1_timestamp),
            porcelain_field("l2_block_number", self.l2_block_number),
            porcelain_field("l2_output_index", self.l2_output_index),
        ]
        .join("\n")
    }
}
