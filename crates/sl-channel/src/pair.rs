use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::{Transport, TransportError};

/// In-process channel endpoint, one half of a connected pair.
///
/// Frames move over unbounded channels, so a send never blocks and `flush`
/// has nothing left to do. Used by tests and examples to run both protocol
/// roles inside one process.
pub struct SimplePair {
    out: Sender<Vec<u8>>,
    inq: Receiver<Vec<u8>>,
}

impl SimplePair {
    /// Create a connected pair of channel endpoints.
    pub fn connect() -> (SimplePair, SimplePair) {
        let (out_tx, out_rx) = unbounded();
        let (in_tx, in_rx) = unbounded();

        let client = SimplePair {
            out: out_tx,
            inq: in_rx,
        };

        let server = SimplePair {
            out: in_tx,
            inq: out_rx,
        };

        (client, server)
    }
}

impl Transport for SimplePair {
    fn send_bytes(&mut self, buf: &[u8]) -> Result<(), TransportError> {
        self.out
            .send(buf.to_vec())
            .map_err(|_| TransportError::Closed)
    }

    fn recv_bytes(&mut self) -> Result<Vec<u8>, TransportError> {
        self.inq.recv().map_err(|_| TransportError::Closed)
    }

    fn flush(&mut self) -> Result<(), TransportError> {
        // every frame is handed over inside send_bytes
        Ok(())
    }
}
