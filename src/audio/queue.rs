use std::collections::VecDeque;
use tracing::{debug, info};

use crate::error::{Result, SessionError};

/// Identificadores de tracks pendientes, estrictamente FIFO.
///
/// El track que suena nunca está aquí: se saca de la cola antes de
/// empezar, así que la cola solo guarda lo que viene *después*.
#[derive(Debug)]
pub struct MusicQueue {
    items: VecDeque<String>,
    max_size: usize,
}

impl MusicQueue {
    pub fn new(max_size: usize) -> Self {
        Self {
            items: VecDeque::new(),
            max_size,
        }
    }

    /// Agrega un track al final de la cola
    pub fn push(&mut self, track_id: String) -> Result<()> {
        if self.items.len() >= self.max_size {
            return Err(SessionError::QueueFull(self.max_size));
        }

        info!("➕ Queued: {}", track_id);
        self.items.push_back(track_id);
        Ok(())
    }

    /// Obtiene el siguiente track (FIFO)
    pub fn pop(&mut self) -> Option<String> {
        let next = self.items.pop_front();
        match &next {
            Some(track_id) => info!("➡️ Next in queue: {}", track_id),
            None => debug!("📭 Queue is empty"),
        }
        next
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            info!("🗑️ Cleared {} queued tracks", self.items.len());
        }
        self.items.clear();
    }

    pub fn tracks(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fifo_order() {
        let mut queue = MusicQueue::new(10);
        queue.push("a".into()).unwrap();
        queue.push("b".into()).unwrap();
        queue.push("c".into()).unwrap();

        assert_eq!(queue.pop().as_deref(), Some("a"));
        assert_eq!(queue.pop().as_deref(), Some("b"));
        assert_eq!(queue.tracks(), vec!["c".to_string()]);
    }

    #[test]
    fn test_rejects_when_full() {
        let mut queue = MusicQueue::new(1);
        queue.push("a".into()).unwrap();

        assert!(matches!(
            queue.push("b".into()),
            Err(SessionError::QueueFull(1))
        ));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut queue = MusicQueue::new(4);
        queue.push("a".into()).unwrap();
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
    }
}
