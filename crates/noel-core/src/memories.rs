use crate::constants::MEMORY_REVEAL_BASE_DELAY_SEC;

/// A photo card floating around the burst tree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Memory {
    pub id: u32,
    pub url: &'static str,
    /// Card centre as a percentage of the viewport.
    pub x_percent: f32,
    pub y_percent: f32,
    pub rotation_deg: f32,
    pub reveal_delay: f32,
}

impl Memory {
    /// CSS animation delay for the card's reveal.
    pub fn animation_delay_sec(&self) -> f32 {
        self.reveal_delay + MEMORY_REVEAL_BASE_DELAY_SEC
    }
}

const fn memory(id: u32, url: &'static str, x: f32, y: f32, r: f32, delay: f32) -> Memory {
    Memory {
        id,
        url,
        x_percent: x,
        y_percent: y,
        rotation_deg: r,
        reveal_delay: delay,
    }
}

pub const MEMORIES: [Memory; 8] = [
    memory(1, "/1.jpg", 25.0, 30.0, -15.0, 0.0),
    memory(2, "/2.jpg", 75.0, 25.0, 10.0, 0.2),
    memory(3, "/3.jpg", 20.0, 70.0, 8.0, 0.4),
    memory(4, "/4.jpg", 80.0, 75.0, -12.0, 0.6),
    memory(5, "/5.jpg", 50.0, 20.0, 5.0, 0.8),
    memory(6, "/6.jpg", 50.0, 80.0, -5.0, 1.0),
    memory(7, "/7.jpg", 15.0, 50.0, 15.0, 1.2),
    memory(8, "/8.jpg", 85.0, 50.0, -8.0, 1.4),
];

pub fn find(id: u32) -> Option<&'static Memory> {
    MEMORIES.iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_delays_increase() {
        for (i, m) in MEMORIES.iter().enumerate() {
            assert_eq!(m.id as usize, i + 1);
            assert!((0.0..=100.0).contains(&m.x_percent));
            assert!((0.0..=100.0).contains(&m.y_percent));
        }
        assert!(MEMORIES.windows(2).all(|w| w[0].reveal_delay < w[1].reveal_delay));
    }

    #[test]
    fn find_and_animation_delay() {
        let m = find(8).expect("memory 8");
        assert_eq!(m.url, "/8.jpg");
        assert!((m.animation_delay_sec() - 2.9).abs() < 1e-6);
        assert!(find(0).is_none());
    }
}
