//! Tool-pair repair for cut transcripts.
//!
//! Cutting a transcript can separate a tool invocation from its result. Model
//! APIs reject either half on its own, and expect the result in the message
//! right after the invocation, so both halves of a broken pair are dropped: a
//! tool-use block survives only if the next message answers it, and a
//! tool-result block survives only if the previous message issued it.

use std::collections::HashSet;

use convoguard_traits::{ContentBlock, Message, MessageContent, PairSanitizer};

#[derive(Debug, Clone, Copy, Default)]
pub struct ToolPairSanitizer;

/// For each message, the ids it issues that the following message answers.
fn answered_by_next(messages: &[Message]) -> Vec<HashSet<String>> {
    let mut answered = vec![HashSet::new(); messages.len()];

    for (index, pair) in messages.windows(2).enumerate() {
        let results: HashSet<&str> = pair[1].tool_result_ids().collect();
        answered[index] = pair[0]
            .tool_use_ids()
            .filter(|id| results.contains(id))
            .map(str::to_string)
            .collect();
    }

    answered
}

fn keep_block(
    block: &ContentBlock,
    issued_here: &HashSet<String>,
    issued_before: Option<&HashSet<String>>,
) -> bool {
    match block {
        ContentBlock::ToolUse { id, .. } => issued_here.contains(id),
        ContentBlock::ToolResult { tool_use_id, .. } => {
            issued_before.is_some_and(|ids| ids.contains(tool_use_id))
        }
        ContentBlock::Text { .. } => true,
    }
}

impl PairSanitizer for ToolPairSanitizer {
    fn sanitize(&self, messages: Vec<Message>) -> Vec<Message> {
        let answered = answered_by_next(&messages);

        let mut sanitized = Vec::with_capacity(messages.len());
        for (index, mut msg) in messages.into_iter().enumerate() {
            let MessageContent::Blocks(blocks) = &mut msg.content else {
                sanitized.push(msg);
                continue;
            };

            let issued_before = index.checked_sub(1).map(|prev| &answered[prev]);
            let before = blocks.len();
            blocks.retain(|block| keep_block(block, &answered[index], issued_before));

            if blocks.len() < before {
                tracing::debug!(
                    message = index,
                    dropped = before - blocks.len(),
                    "Dropped orphaned tool blocks"
                );
            }

            // Drop messages emptied by the repair; keep ones that were empty already.
            if blocks.is_empty() && before > 0 {
                continue;
            }
            sanitized.push(msg);
        }

        sanitized
    }
}
