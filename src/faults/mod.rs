//! # Inyección de Fallas
//! src/faults/mod.rs
//!
//! Estrategias que pueden reemplazar una respuesta por un status fijo antes
//! de escribirla. El [`ResponseWriter`](crate::server::ResponseWriter) recibe
//! una al construirse; no hay estado global.
//!
//! - [`NoFaults`]: nunca interviene
//! - [`EveryNth`]: determinístico, cada N-ésima respuesta
//! - [`Probabilistic`]: con probabilidad `p` por respuesta
//! - [`FaultPlan`]: combina varias; todas se consultan en cada llamada y
//!   gana la primera que dispara
//!
//! Todas son `Send + Sync` para poder compartirse entre threads en modo
//! `threaded`.

use crate::config::Config;
use crate::http::StatusCode;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Decide si la próxima respuesta se reemplaza
pub trait FaultInjector: Send + Sync {
    /// Se llama una vez por respuesta escrita. `Some(status)` reemplaza la
    /// respuesta por una desnuda con ese status.
    fn intercept(&self) -> Option<StatusCode>;
}

/// Nunca inyecta fallas
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFaults;

impl FaultInjector for NoFaults {
    fn intercept(&self) -> Option<StatusCode> {
        None
    }
}

/// Inyecta `status` en cada N-ésima respuesta
///
/// El contador es compartido por todas las conexiones y no se reinicia
/// entre requests.
#[derive(Debug)]
pub struct EveryNth {
    status: StatusCode,
    every: u64,
    counter: AtomicU64,
}

impl EveryNth {
    /// `every` debe ser al menos 1; `Config::validate` lo garantiza
    pub fn new(status: StatusCode, every: u64) -> Self {
        Self {
            status,
            every: every.max(1),
            counter: AtomicU64::new(0),
        }
    }

    /// Cantidad de respuestas vistas desde el último disparo
    pub fn pending(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl FaultInjector for EveryNth {
    fn intercept(&self) -> Option<StatusCode> {
        let every = self.every;
        let previous = match self
            .counter
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                Some(if count + 1 >= every { 0 } else { count + 1 })
            }) {
            Ok(count) | Err(count) => count,
        };

        (previous + 1 >= every).then_some(self.status)
    }
}

/// Inyecta `status` con probabilidad `probability` en cada respuesta
#[derive(Debug)]
pub struct Probabilistic {
    status: StatusCode,
    probability: f64,
    rng: Mutex<fastrand::Rng>,
}

impl Probabilistic {
    /// Generador con semilla aleatoria
    pub fn new(status: StatusCode, probability: f64) -> Self {
        Self::with_rng(status, probability, fastrand::Rng::new())
    }

    /// Generador con semilla fija, para corridas reproducibles
    pub fn seeded(status: StatusCode, probability: f64, seed: u64) -> Self {
        Self::with_rng(status, probability, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(status: StatusCode, probability: f64, rng: fastrand::Rng) -> Self {
        Self {
            status,
            probability: probability.clamp(0.0, 1.0),
            rng: Mutex::new(rng),
        }
    }
}

impl FaultInjector for Probabilistic {
    fn intercept(&self) -> Option<StatusCode> {
        if self.probability <= 0.0 {
            return None;
        }

        let draw = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            rng.f64()
        };

        (draw < self.probability).then_some(self.status)
    }
}

/// Combinación ordenada de estrategias
#[derive(Default)]
pub struct FaultPlan {
    injectors: Vec<Box<dyn FaultInjector>>,
}

impl FaultPlan {
    /// Plan vacío: equivalente a [`NoFaults`]
    pub fn none() -> Self {
        Self::default()
    }

    /// Agrega una estrategia al final del plan
    pub fn with<F: FaultInjector + 'static>(mut self, injector: F) -> Self {
        self.injectors.push(Box::new(injector));
        self
    }

    /// Construye el plan a partir de la configuración
    ///
    /// El orden es: primero la probabilística, después la determinística.
    pub fn from_config(config: &Config) -> Self {
        let status = config.fault_status();
        let mut plan = Self::none();

        if config.fault_probability > 0.0 {
            plan = match config.fault_seed {
                Some(seed) => plan.with(Probabilistic::seeded(status, config.fault_probability, seed)),
                None => plan.with(Probabilistic::new(status, config.fault_probability)),
            };
        }

        if let Some(every) = config.fault_every {
            plan = plan.with(EveryNth::new(status, every));
        }

        plan
    }

    pub fn is_empty(&self) -> bool {
        self.injectors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.injectors.len()
    }
}

impl FaultInjector for FaultPlan {
    fn intercept(&self) -> Option<StatusCode> {
        // Todas se consultan para que los contadores avancen parejo
        self.injectors
            .iter()
            .map(|injector| injector.intercept())
            .fold(None, |fired, next| fired.or(next))
    }
}

impl std::fmt::Debug for FaultPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaultPlan")
            .field("injectors", &self.injectors.len())
            .finish()
    }
}
