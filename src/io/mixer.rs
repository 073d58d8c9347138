//! Realtime side of one-shot playback.
//!
//! Runs inside the device callback. Buffers arrive through a ring, play once
//! from their first frame to their last, and go back through a second ring so
//! the control thread frees them. Nothing here allocates or blocks.

use rtrb::{Consumer, Producer, PushError};

use crate::io::AudioBuffer;

/// One-shots that can sound at the same time. Later arrivals wait in the ring.
pub const MAX_ACTIVE_ONESHOTS: usize = 16;

struct OneShot {
    buffer: AudioBuffer,
    cursor: usize,
}

impl OneShot {
    fn is_finished(&self) -> bool {
        self.cursor >= self.buffer.frames()
    }
}

pub struct OneShotMixer {
    incoming: Consumer<AudioBuffer>,
    retired: Producer<AudioBuffer>,
    active: Vec<OneShot>,
    channels: usize,
}

impl OneShotMixer {
    pub fn new(
        incoming: Consumer<AudioBuffer>,
        retired: Producer<AudioBuffer>,
        channels: usize,
    ) -> Self {
        Self {
            incoming,
            retired,
            active: Vec::with_capacity(MAX_ACTIVE_ONESHOTS),
            channels,
        }
    }

    /// Overwrite `out` (interleaved, `channels` wide) with the sum of all
    /// active one-shots.
    pub fn render(&mut self, out: &mut [f32]) {
        out.fill(0.0);

        // Admit new arrivals while there is room
        while self.active.len() < MAX_ACTIVE_ONESHOTS {
            match self.incoming.pop() {
                Ok(buffer) => self.active.push(OneShot { buffer, cursor: 0 }),
                Err(_) => break,
            }
        }

        for shot in self.active.iter_mut() {
            let mixed = shot
                .buffer
                .mix_interleaved(shot.cursor, out, self.channels);
            shot.cursor += mixed;
        }

        self.retire_finished();
    }

    /// Number of one-shots currently sounding (or waiting to be handed back).
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    fn retire_finished(&mut self) {
        let mut i = 0;
        while i < self.active.len() {
            if !self.active[i].is_finished() {
                i += 1;
                continue;
            }

            let shot = self.active.swap_remove(i);
            if let Err(PushError::Full(buffer)) = self.retired.push(shot.buffer) {
                // Return ring is full; hold on to it and retry next block
                let cursor = buffer.frames();
                self.active.push(OneShot { buffer, cursor });
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtrb::RingBuffer;

    fn mixer(channels: usize) -> (Producer<AudioBuffer>, Consumer<AudioBuffer>, OneShotMixer) {
        let (tx, rx) = RingBuffer::new(32);
        let (retired_tx, retired_rx) = RingBuffer::new(32);
        (tx, retired_rx, OneShotMixer::new(rx, retired_tx, channels))
    }

    #[test]
    fn idle_mixer_outputs_silence() {
        let (_tx, _retired, mut mixer) = mixer(2);
        let mut out = vec![1.0; 8];

        mixer.render(&mut out);

        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn one_shot_plays_once_then_retires() {
        let (mut tx, mut retired, mut mixer) = mixer(2);
        tx.push(AudioBuffer::from_mono(10, vec![0.1, 0.2, 0.3])).unwrap();

        let mut out = vec![0.0; 4];
        mixer.render(&mut out);
        assert_eq!(out, vec![0.1, 0.1, 0.2, 0.2]);
        assert_eq!(mixer.active_count(), 1);

        mixer.render(&mut out);
        assert_eq!(out, vec![0.3, 0.3, 0.0, 0.0]);
        assert_eq!(mixer.active_count(), 0);
        assert_eq!(retired.pop().unwrap().frames(), 3);

        mixer.render(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn overlapping_one_shots_are_summed() {
        let (mut tx, _retired, mut mixer) = mixer(1);
        tx.push(AudioBuffer::from_mono(10, vec![0.25; 4])).unwrap();
        tx.push(AudioBuffer::from_mono(10, vec![0.5; 2])).unwrap();

        let mut out = vec![0.0; 4];
        mixer.render(&mut out);

        assert_eq!(out, vec![0.75, 0.75, 0.25, 0.25]);
    }

    #[test]
    fn excess_arrivals_wait_for_a_free_slot() {
        let (mut tx, _retired, mut mixer) = mixer(1);
        for _ in 0..MAX_ACTIVE_ONESHOTS + 2 {
            tx.push(AudioBuffer::from_mono(10, vec![1.0; 2])).unwrap();
        }

        let mut out = vec![0.0; 1];
        mixer.render(&mut out);
        assert_eq!(out[0], MAX_ACTIVE_ONESHOTS as f32);

        // First wave still has one frame left, the two late ones start after
        mixer.render(&mut out);
        mixer.render(&mut out);
        assert_eq!(out[0], 2.0);
    }

    #[test]
    fn full_return_ring_keeps_buffer_silent() {
        let (mut tx, rx) = RingBuffer::new(4);
        let (retired_tx, mut retired_rx) = RingBuffer::new(1);
        let mut mixer = OneShotMixer::new(rx, retired_tx, 1);
        tx.push(AudioBuffer::from_mono(10, vec![1.0])).unwrap();
        tx.push(AudioBuffer::from_mono(10, vec![1.0])).unwrap();

        let mut out = vec![0.0; 2];
        mixer.render(&mut out);
        assert_eq!(out, vec![2.0, 0.0]);
        assert_eq!(mixer.active_count(), 1);

        mixer.render(&mut out);
        assert_eq!(out, vec![0.0, 0.0]);

        retired_rx.pop().unwrap();
        mixer.render(&mut out);
        assert_eq!(mixer.active_count(), 0);
    }
}
