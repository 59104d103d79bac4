//! Background request runner
//!
//! Each dispatched request runs on its own thread against the gateway and
//! reports back through a channel. The UI thread drains completions on tick.

use super::gateway::{Gateway, GatewayError, Request, Response};
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, warn};

/// Identifies one dispatched request; later tickets compare greater
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

/// A finished request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub ticket: Ticket,
    pub request: Request,
    pub result: Result<Response, GatewayError>,
}

struct Finished {
    ticket: Ticket,
    result: Result<Response, GatewayError>,
}

struct InFlight {
    request: Request,
    started: Instant,
}

/// Dispatches requests off the UI thread
pub struct RequestRunner {
    gateway: Arc<dyn Gateway>,
    tx: Sender<Finished>,
    rx: Receiver<Finished>,
    next_ticket: u64,
    in_flight: HashMap<Ticket, InFlight>,
}

impl RequestRunner {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            gateway,
            tx,
            rx,
            next_ticket: 1,
            in_flight: HashMap::new(),
        }
    }

    /// Start a request in the background
    pub fn dispatch(&mut self, request: Request) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;

        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        let thread_request = request.clone();
        thread::spawn(move || {
            let result = gateway.execute(&thread_request);
            // The runner may be gone if the app is shutting down
            let _ = tx.send(Finished { ticket, result });
        });

        debug!(
            ticket = ticket.0,
            procedure = request.procedure(),
            mutation = request.is_mutation(),
            "dispatched"
        );
        self.in_flight.insert(
            ticket,
            InFlight {
                request,
                started: Instant::now(),
            },
        );
        ticket
    }

    /// Collect every request that finished since the last poll
    pub fn poll(&mut self) -> Vec<Completion> {
        let mut completions = Vec::new();
        while let Ok(finished) = self.rx.try_recv() {
            let Some(in_flight) = self.in_flight.remove(&finished.ticket) else {
                warn!(ticket = finished.ticket.0, "completion for unknown ticket");
                continue;
            };
            debug!(
                ticket = finished.ticket.0,
                procedure = in_flight.request.procedure(),
                ok = finished.result.is_ok(),
                elapsed_ms = in_flight.started.elapsed().as_millis() as u64,
                "completed"
            );
            completions.push(Completion {
                ticket: finished.ticket,
                request: in_flight.request,
                result: finished.result,
            });
        }
        completions
    }

    /// Number of requests still running
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }
}
