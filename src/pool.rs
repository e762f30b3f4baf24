// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The row-at-a-time worker pool shared by the compute and render
//! passes.
//!
//! A buffer holding a row-major grid is cut into rows, and the rows
//! are put behind a single mutex as an iterator.  Each worker takes
//! the lock only long enough to pull the next row, and then owns that
//! row's slice outright for the whole of its column sweep.  Because
//! the slices handed out are disjoint `&mut` borrows, no two workers
//! can ever be given the same row, and the writes themselves need no
//! synchronization at all.

use log::debug;
use std::any::Any;
use std::panic;
use std::sync::{Arc, Mutex, PoisonError};

/// Runs `work` over every row of `buffer`, `cols` cells to a row, on a
/// pool of at most `threads` scoped threads.  Returns once every row
/// has been processed.
///
/// If a worker panics, the panic is carried back to the calling
/// thread once the remaining workers have joined.
pub(crate) fn for_each_row<T, F>(buffer: &mut [T], cols: usize, threads: usize, work: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    if cols == 0 || buffer.is_empty() {
        return;
    }

    let row_count = buffer.len() / cols;
    let workers = threads.max(1).min(row_count);
    debug!("sweeping {} rows with {} workers", row_count, workers);

    let rows = Arc::new(Mutex::new(buffer.chunks_mut(cols).enumerate()));
    let work = &work;
    let outcome = crossbeam::scope(|spawner| {
        for _ in 0..workers {
            let rows = rows.clone();
            spawner.spawn(move |_| loop {
                let row = rows.lock().unwrap_or_else(PoisonError::into_inner).next();
                match row {
                    Some((index, row)) => work(index, row),
                    None => {
                        break;
                    }
                }
            });
        }
    });

    // The scope collects every worker's panic; re-raise the first.
    if let Err(cause) = outcome {
        match cause.downcast::<Vec<Box<dyn Any + Send + 'static>>>() {
            Ok(mut panics) if !panics.is_empty() => panic::resume_unwind(panics.remove(0)),
            Ok(_) => panic!("a row worker panicked"),
            Err(cause) => panic::resume_unwind(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn every_row_is_visited_once() {
        let (rows, cols) = (37, 5);
        let mut buffer = vec![0usize; rows * cols];
        let visits = AtomicUsize::new(0);
        for_each_row(&mut buffer, cols, 8, |index, row| {
            visits.fetch_add(1, Ordering::SeqCst);
            for cell in row.iter_mut() {
                *cell += index + 1;
            }
        });
        assert_eq!(visits.load(Ordering::SeqCst), rows);
        for (index, row) in buffer.chunks(cols).enumerate() {
            assert!(row.iter().all(|&v| v == index + 1));
        }
    }

    #[test]
    fn more_threads_than_rows() {
        let mut buffer = vec![0u8; 2 * 3];
        for_each_row(&mut buffer, 3, 64, |_, row| {
            for cell in row.iter_mut() {
                *cell = 1;
            }
        });
        assert!(buffer.iter().all(|&v| v == 1));
    }

    #[test]
    fn no_more_workers_than_threads() {
        let mut buffer = vec![thread::current().id(); 64];
        for_each_row(&mut buffer, 1, 4, |_, row| {
            thread::sleep(std::time::Duration::from_millis(2));
            row[0] = thread::current().id();
        });
        let ids: HashSet<_> = buffer.into_iter().collect();
        assert!(!ids.is_empty() && ids.len() <= 4);
    }

    #[test]
    fn empty_buffers_are_a_no_op() {
        let mut buffer: Vec<u8> = vec![];
        for_each_row(&mut buffer, 4, 4, |_, _| panic!("no rows to visit"));
        let mut buffer = vec![0u8; 4];
        for_each_row(&mut buffer, 0, 4, |_, _| panic!("no columns to visit"));
    }

    #[test]
    #[should_panic(expected = "row 3")]
    fn worker_panics_reach_the_caller() {
        let mut buffer = vec![0u8; 10];
        for_each_row(&mut buffer, 1, 2, |index, _| {
            if index == 3 {
                panic!("row {}", index);
            }
        });
    }
}
