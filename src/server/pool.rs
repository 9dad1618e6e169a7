//! # Pool Fijo de Workers
//! src/server/pool.rs
//!
//! Cola FIFO thread-safe (`Mutex<VecDeque>` + `Condvar`) drenada por un
//! número fijo de threads. `submit` nunca bloquea: si todos los workers
//! están ocupados, el trabajo espera en la cola.
//!
//! El pool pertenece a quien lo crea (el `Server`); al hacer `drop` deja de
//! aceptar trabajos, termina lo encolado y hace `join` de sus threads.

use std::collections::VecDeque;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

/// Número de workers del servidor
pub const WORKER_COUNT: usize = 2;

/// Unidad de trabajo que ejecuta un worker
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Error al encolar en un pool que ya se cerró
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolClosed;

impl fmt::Display for PoolClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Worker pool is shut down")
    }
}

impl std::error::Error for PoolClosed {}

/// Estado compartido entre el pool y sus workers
struct Queue {
    jobs: VecDeque<Job>,
    closed: bool,
}

struct Shared {
    queue: Mutex<Queue>,
    condvar: Condvar,
}

impl Shared {
    /// Toma el lock aunque otro thread haya hecho panic con él tomado
    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Pool de threads de tamaño fijo
pub struct WorkerPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Crea un pool con `size` workers (mínimo 1)
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        let shared = Arc::new(Shared {
            queue: Mutex::new(Queue {
                jobs: VecDeque::new(),
                closed: false,
            }),
            condvar: Condvar::new(),
        });

        let workers = (0..size)
            .filter_map(|i| {
                let shared = Arc::clone(&shared);
                let name = format!("worker-{}", i);
                thread::Builder::new()
                    .name(name.clone())
                    .spawn(move || Self::worker_loop(name, shared))
                    .map_err(|e| eprintln!("[!] No se pudo crear worker-{}: {}", i, e))
                    .ok()
            })
            .collect();

        Self { shared, workers }
    }

    /// Encola un trabajo
    ///
    /// Retorna `Err(PoolClosed)` si el pool ya se cerró.
    pub fn submit<F>(&self, job: F) -> Result<(), PoolClosed>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut queue = self.shared.lock();
        if queue.closed {
            return Err(PoolClosed);
        }

        queue.jobs.push_back(Box::new(job));

        // Despertar a un worker dormido
        self.shared.condvar.notify_one();
        Ok(())
    }

    /// Número de workers vivos
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Deja de aceptar trabajos, drena la cola y espera a los workers
    pub fn shutdown(&mut self) {
        {
            let mut queue = self.shared.lock();
            queue.closed = true;
        }
        self.shared.condvar.notify_all();

        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }

    /// Loop principal del worker
    fn worker_loop(name: String, shared: Arc<Shared>) {
        loop {
            let job = {
                let mut queue = shared.lock();
                loop {
                    if let Some(job) = queue.jobs.pop_front() {
                        break Some(job);
                    }
                    if queue.closed {
                        break None;
                    }
                    queue = shared
                        .condvar
                        .wait(queue)
                        .unwrap_or_else(|poisoned| poisoned.into_inner());
                }
            };

            let Some(job) = job else {
                return;
            };

            // Un panic dentro del trabajo no debe matar al worker
            if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                eprintln!("[!] {}: el trabajo terminó con panic", name);
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
