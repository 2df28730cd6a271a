#![no_main]

use libfuzzer_sys::fuzz_target;
use chunkpool::{Chunk, Handle, MemoryPool};

fn stamp(buf: &mut [u8], tag: u32) {
    for word in buf.chunks_exact_mut(4) {
        word.copy_from_slice(&tag.to_le_bytes());
    }
}

fn is_stamped(buf: &[u8], tag: u32) -> bool {
    buf.chunks_exact(4).all(|word| word == tag.to_le_bytes())
}

fuzz_target!(|data: Vec<u8>| {
    let Some((&count, ops)) = data.split_first() else {
        return;
    };
    let chunk_count = usize::from(count % 8) + 1;
    let pool = MemoryPool::new(8, chunk_count).unwrap();

    let mut handles: Vec<Handle> = Vec::new();
    // each live chunk is stamped with its step number, unique per run
    let mut chunks: Vec<(Chunk, u32)> = Vec::new();

    for (step, &op) in ops.iter().enumerate() {
        let tag = step as u32;
        match op % 6 {
            0 => {
                let handle = pool.try_get_chunk_handle();
                if handle.is_valid() {
                    handles.push(handle);
                }
            }
            1 => {
                let mut chunk = pool.get_chunk();
                stamp(chunk.as_mut_slice(), tag);
                chunks.push((chunk, tag));
            }
            2 if !handles.is_empty() => {
                let mut handle = handles.swap_remove(usize::from(op) % handles.len());
                pool.release_chunk_handle(&mut handle).unwrap();
                assert_eq!(handle, Handle::INVALID);
            }
            3 if !chunks.is_empty() => {
                let (mut chunk, _) = chunks.swap_remove(usize::from(op) % chunks.len());
                chunk.dispose();
                chunk.dispose();
            }
            4 if !handles.is_empty() => {
                let mut handle = handles.swap_remove(usize::from(op) % handles.len());
                let mut chunk: Chunk = pool.adopt_handle(&mut handle).unwrap().into();
                stamp(chunk.as_mut_slice(), tag);
                chunks.push((chunk, tag));
            }
            5 => {
                // arbitrary raw values must never corrupt state
                let mut handle = Handle::from_raw(isize::from(op as i8));
                if !handles.contains(&handle) {
                    assert!(pool.release_chunk_handle(&mut handle).is_err());
                }
            }
            _ => {}
        }

        // Verify: live windows are never shared
        for (chunk, tag) in &chunks {
            assert!(is_stamped(chunk, *tag));
        }

        // Verify: accounting matches what is held
        let pooled = chunks.iter().filter(|(c, _)| c.is_pooled()).count();
        assert_eq!(pool.total_allocated(), handles.len() + pooled);
    }

    drop(chunks);
    for mut handle in handles {
        pool.release_chunk_handle(&mut handle).unwrap();
    }
    assert_eq!(pool.total_allocated(), 0);
});
