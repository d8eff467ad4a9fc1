//! Render-thread reads racing control-thread writes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use flanger_core::{BlockParameters, EffectConfig, ParameterHost};

#[test]
fn reader_only_sees_stored_values() {
    let mut host = ParameterHost::new(&EffectConfig::new("Flanger")).unwrap();
    let reader = host.reader();
    let addresses = host.engine_addresses().unwrap();
    let done = Arc::new(AtomicBool::new(false));

    let render = {
        let done = done.clone();
        thread::spawn(move || {
            let mut blocks = 0usize;
            while !done.load(Ordering::Acquire) {
                let block = BlockParameters::read(&reader, &addresses);
                assert!((0.01..=8.0).contains(&block.rate_hz), "rate {}", block.rate_hz);
                assert!((0.01..=10.0).contains(&block.delay_ms), "delay {}", block.delay_ms);
                for mix in [block.depth, block.dry, block.wet] {
                    assert!((0.0..=1.0).contains(&mix), "mix {}", mix);
                }
                blocks += 1;
            }
            blocks
        })
    };

    for round in 0..2_000 {
        host.apply_factory_preset(round % 6).unwrap();
        host.store().write(addresses.rate, round as f64).unwrap();
        host.store().write(addresses.delay, -(round as f64)).unwrap();
        host.store().write(addresses.wet, f64::INFINITY).unwrap();
    }
    done.store(true, Ordering::Release);

    let blocks = render.join().unwrap();
    assert!(blocks > 0);
}

#[test]
fn readers_are_independent_handles() {
    let host = ParameterHost::new(&EffectConfig::new("Flanger")).unwrap();
    let readers: Vec<_> = (0..4).map(|_| host.reader()).collect();
    let rate = host.engine_addresses().unwrap().rate;

    host.store().write(rate, 4.0).unwrap();
    let handles: Vec<_> = readers
        .into_iter()
        .map(|reader| thread::spawn(move || reader.read(rate)))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 4.0);
    }
}
