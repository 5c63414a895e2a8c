//! Batched OT label exchange between two threads.
//!
//! One thread plays the garbler holding 64 label pairs, the other plays
//! the evaluator holding 64 selection bits; both ends of an in-process
//! channel pair run the full protocol. Set `RUST_LOG=trace` to watch the
//! rounds.

use std::thread;

use rand::{thread_rng, Rng};

use sl_channel::SimplePair;
use sl_simplest_ot::batch::{BatchReceiver, BatchSender, LabelPair};
use sl_simplest_ot::simplest_ot::{ReceiverConfig, SenderConfig};

const NUM_LABELS: usize = 64;
const LABEL_LEN: usize = 16;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut rng = thread_rng();

    let pairs: Vec<LabelPair> = (0..NUM_LABELS)
        .map(|_| {
            let mut zero = vec![0u8; LABEL_LEN];
            let mut one = vec![0u8; LABEL_LEN];
            rng.fill(zero.as_mut_slice());
            rng.fill(one.as_mut_slice());
            (zero, one)
        })
        .collect();
    let bits: Vec<bool> = (0..NUM_LABELS).map(|_| rng.gen()).collect();

    let (left, right) = SimplePair::connect();

    let sender_pairs = pairs.clone();
    let sender = thread::spawn(move || {
        let mut sender =
            BatchSender::new(SenderConfig::new(), left).expect("sender handshake failed");
        sender
            .send(&sender_pairs, &mut thread_rng())
            .expect("label transfer failed");
    });

    let mut receiver =
        BatchReceiver::new(ReceiverConfig::new(), right).expect("receiver handshake failed");
    let labels = receiver
        .receive(&bits, &mut thread_rng())
        .expect("label recovery failed");

    sender.join().expect("sender thread panicked");

    for ((pair, bit), label) in pairs.iter().zip(&bits).zip(&labels) {
        let expected = if *bit { &pair.1 } else { &pair.0 };
        assert_eq!(label, expected);
    }

    println!("transferred {NUM_LABELS} label pairs, every selection matched");
}
