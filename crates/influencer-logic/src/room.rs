//! Room description ladder.

use crate::equipment::Equipment;

/// One description per room tier, humblest first.
pub const ROOM_DESCRIPTIONS: [&str; 7] = [
    "A humble room with worn-out walls, a simple bed and furniture made of boxes.",
    "The room looks a little better, with some basic gear and modest decoration.",
    "A tidier space with better lighting and mid-range equipment.",
    "A well-equipped room with decent technology and pleasant decoration.",
    "A semi-professional studio with good gear and a cozy atmosphere.",
    "A professional workspace with high quality equipment.",
    "An elite influencer studio with the best technology available.",
];

/// Describe a room by tier, calling out the first standout piece of gear.
///
/// Gear only gets mentioned once the room holds more than one item.
pub fn room_description(level: u32, equipment: &[Equipment]) -> String {
    let index = (level.saturating_sub(1) as usize).min(ROOM_DESCRIPTIONS.len() - 1);
    let mut description = ROOM_DESCRIPTIONS[index].to_string();

    if equipment.len() > 1 {
        if let Some(standout) = equipment.iter().find(|e| e.quality >= 5) {
            description.push_str(&format!(
                " Your {} stands out.",
                standout.name.to_lowercase()
            ));
        }
    }

    description
}
