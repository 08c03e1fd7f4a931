use std::collections::VecDeque;

use super::{PowerWatt,Seconds};

// the accumulator threaded through one propagation run
// noise and latency start at zero and only ever grow,
// the route is consumed from the front, one label per hop
#[derive(Clone,Debug)]
pub struct SignalState {
    signal_power:PowerWatt,
    noise_power:PowerWatt,
    latency:Seconds,
    path:VecDeque<String>,
}

impl SignalState {
    pub fn new(signal_power:PowerWatt,path:Vec<String>) -> Self {
        Self {
            signal_power,
            noise_power:0.0,
            latency:0.0,
            path:VecDeque::from(path),
        }
    }

    pub fn signal_power(&self) -> PowerWatt {
        self.signal_power
    }
    pub fn noise_power(&self) -> PowerWatt {
        self.noise_power
    }
    pub fn latency(&self) -> Seconds {
        self.latency
    }
    pub fn path(&self) -> &VecDeque<String> {
        &self.path
    }

    //updates are additive, values are never overwritten
    pub fn update_signal_power(&mut self,update:PowerWatt) {
        self.signal_power += update;
    }
    pub fn update_noise_power(&mut self,update:PowerWatt) {
        self.noise_power += update;
    }
    pub fn update_latency(&mut self,update:Seconds) {
        self.latency += update;
    }

    //consumes the front label of the remaining route
    pub fn update_path(&mut self) -> Option<String> {
        self.path.pop_front()
    }

    //zero noise is not an error, it means an infinitely clean signal
    pub fn snr_db(&self) -> f64 {
        if self.noise_power > 0.0 {
            10.0*(self.signal_power/self.noise_power).log10()
        } else {
            f64::INFINITY
        }
    }
}
