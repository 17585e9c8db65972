//! Parallel parsing of GenBank records
//!
//! The input is read in a background thread, which divides it into
//! records. Each record is parsed in a thread pool, while the reader
//! proceeds. The parsed records are returned to the calling thread in the
//! order of the input, regardless of the order in which parsing finishes.
//!
//! The number of records being parsed or waiting to be returned is limited
//! by `queue_len`. If it is reached, the reader waits until the next record
//! in the input order has been returned.
//!
//! # Per-record processing
//!
//! ```no_run
//! use gbff_io::genbank::Reader;
//! use std::fs::File;
//! use std::io::BufWriter;
//!
//! let reader = Reader::from_path("seqs.gbff").unwrap();
//! let mut writer = BufWriter::new(File::create("copy.gbff").unwrap());
//!
//! gbff_io::parallel::parallel_records(reader, 4, 16, |i, result| {
//!     match result {
//!         Ok(record) => record.write(&mut writer).unwrap(),
//!         Err(e) => eprintln!("record {} skipped: {}", i, e),
//!     }
//!     // `false` will stop the reader
//!     true
//! }).unwrap();
//! ```
//!
//! # Doing more work in the thread pool
//!
//! With [`read_parallel`](read_parallel), a function can be applied to
//! every record in the thread pool. This example computes the GC content:
//!
//! ```no_run
//! use gbff_io::genbank::Reader;
//! use gbff_io::parallel::read_parallel;
//!
//! let reader = Reader::from_path("seqs.gbff").unwrap();
//!
//! read_parallel(reader, 4, 16, |result| {
//!     // this function does the heavy work
//!     result.map(|record| {
//!         let gc = record.sequence.bytes().filter(|b| b"GCgc".contains(b)).count();
//!         (record.name().unwrap_or("").to_string(), gc as f64 / record.sequence.len() as f64)
//!     })
//! }, |results| {
//!     // This function runs in the main thread. It provides a streaming
//!     // iterator over the results in input order.
//!     while let Some(result) = results.next() {
//!         let (_, parsed) = result.unwrap();
//!         if let Ok((name, gc)) = parsed {
//!             println!("{}: {:.3}", name, gc);
//!         }
//!     }
//! });
//! ```

use std::collections::BTreeMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use crossbeam_utils::thread as cb_thread;
use log::debug;

use crate::genbank::{self, Error, Reader, Record};

enum Message<T> {
    Parsed(u64, T),
    // the reader failed, no more records will follow
    Failed(Error),
}

/// Reads records in a background thread and applies `work` to the parsing
/// result of each record in a pool of `n_threads` threads. The results are
/// accessed in the calling thread through [`OrderedResults`], which is
/// passed to `func`.
///
/// `queue_len` is the maximum number of records that are parsed or wait
/// for being returned at the same time.
pub fn read_parallel<R, W, T, F, Out>(
    mut reader: Reader<R>,
    n_threads: u32,
    queue_len: usize,
    work: W,
    func: F,
) -> Out
where
    R: io::Read + Send,
    W: Fn(genbank::Result<Record>) -> T + Send + Sync,
    T: Send,
    F: FnOnce(&mut OrderedResults<T>) -> Out,
{
    assert!(n_threads > 0);
    assert!(queue_len > 0);

    let (done_send, done_recv) = mpsc::sync_channel(queue_len + 1);
    let (slot_send, slot_recv) = mpsc::sync_channel(queue_len);
    let stop = AtomicBool::new(false);

    let res = cb_thread::scope(|scope| {
        let stop = &stop;
        let work = &work;

        scope.spawn(move |_| {
            let mut pool = scoped_threadpool::Pool::new(n_threads);

            pool.scoped(|pool_scope| {
                loop {
                    // wait for a free slot
                    if slot_recv.recv().is_err() || stop.load(Ordering::Relaxed) {
                        break;
                    }

                    match reader.next_raw() {
                        Some(Ok(raw)) => {
                            // each time, we need a new reference
                            let done_send = done_send.clone();
                            pool_scope.execute(move || {
                                let index = raw.index();
                                let out = work(raw.parse());
                                done_send.send(Message::Parsed(index, out)).ok();
                            });
                        }
                        Some(Err(e)) => {
                            done_send.send(Message::Failed(e)).ok();
                            break;
                        }
                        None => break,
                    }
                }

                // make sure that the channel is only closed after all records are done
                pool_scope.join_all();
            });
            debug!("reader finished after {} records", reader.num_records());
        });

        for _ in 0..queue_len {
            slot_send.send(()).ok();
        }

        let mut results = OrderedResults {
            slot_send,
            done_recv,
            pending: BTreeMap::new(),
            next: 0,
            stop,
            failed: false,
        };

        let out = func(&mut results);

        results.stop();

        out
    });

    match res {
        Ok(out) => out,
        Err(e) => std::panic::resume_unwind(e),
    }
}

/// Streaming iterator over the results of [`read_parallel`], in the order
/// of the input.
pub struct OrderedResults<'a, T> {
    slot_send: mpsc::SyncSender<()>,
    done_recv: mpsc::Receiver<Message<T>>,
    // finished out of order, waiting for their turn
    pending: BTreeMap<u64, T>,
    next: u64,
    stop: &'a AtomicBool,
    failed: bool,
}

impl<'a, T> OrderedResults<'a, T> {
    /// Returns the next result together with the index of the record, or
    /// `None` if all records were returned. I/O errors are returned as
    /// `Some(Err(_))`, after which `None` follows.
    pub fn next(&mut self) -> Option<Result<(u64, T), Error>> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(out) = self.pending.remove(&self.next) {
                let index = self.next;
                self.next += 1;
                // release the slot, error: channel closed is not a problem
                self.slot_send.send(()).ok();
                return Some(Ok((index, out)));
            }

            match self.done_recv.recv() {
                Ok(Message::Parsed(index, out)) => {
                    self.pending.insert(index, out);
                }
                Ok(Message::Failed(e)) => {
                    self.failed = true;
                    return Some(Err(e));
                }
                // all senders dropped: reading and parsing finished
                Err(_) => return None,
            }
        }
    }

    /// Number of results returned so far
    #[inline]
    pub fn num_returned(&self) -> u64 {
        self.next
    }

    // has to be called before the object goes out of scope
    fn stop(self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Parses records in parallel and calls `func` with the index and the
/// parsing result of each record, in input order. Returning `false` from
/// `func` stops reading. Only I/O errors are returned, errors in single
/// records are passed to `func`.
pub fn parallel_records<R, F>(
    reader: Reader<R>,
    n_threads: u32,
    queue_len: usize,
    mut func: F,
) -> Result<(), Error>
where
    R: io::Read + Send,
    F: FnMut(u64, genbank::Result<Record>) -> bool,
{
    read_parallel(
        reader,
        n_threads,
        queue_len,
        |res: genbank::Result<Record>| res,
        |results| -> Result<(), Error> {
            while let Some(item) = results.next() {
                let (i, res) = item?;
                if !func(i, res) {
                    break;
                }
            }
            Ok(())
        },
    )
}

/// Parses all records in parallel and collects the results in input order.
///
/// An I/O error aborts parsing and is returned as `Err`. Errors in single
/// records are stored at the position of the record in the returned
/// [`ParseOutcome`].
pub fn parse_all<R>(
    reader: Reader<R>,
    n_threads: u32,
    queue_len: usize,
) -> Result<ParseOutcome, Error>
where
    R: io::Read + Send,
{
    let mut results = vec![];
    parallel_records(reader, n_threads, queue_len, |_, res| {
        results.push(res);
        true
    })?;
    debug!("{} records parsed in parallel", results.len());
    Ok(ParseOutcome { results })
}

/// Results of [`parse_all`]: one entry per record, in input order.
#[derive(Debug)]
pub struct ParseOutcome {
    results: Vec<genbank::Result<Record>>,
}

impl ParseOutcome {
    /// Number of records (including failed ones)
    #[inline]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns `true` if all records were parsed successfully
    pub fn is_ok(&self) -> bool {
        self.results.iter().all(|r| r.is_ok())
    }

    #[inline]
    pub fn results(&self) -> &[genbank::Result<Record>] {
        &self.results
    }

    /// Returns the failed records with their index
    pub fn errors(&self) -> impl Iterator<Item = (usize, &Error)> {
        self.results
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.as_ref().err().map(|e| (i, e)))
    }

    #[inline]
    pub fn into_results(self) -> Vec<genbank::Result<Record>> {
        self.results
    }

    /// Returns all records, or the error of the first record that
    /// failed.
    pub fn into_records(self) -> Result<Vec<Record>, Error> {
        self.results.into_iter().collect()
    }
}
