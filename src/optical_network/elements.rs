use std::collections::BTreeMap;

use super::signal::SignalState;
use super::{ASE_COEFFICIENT,DistanceM,PowerWatt,Seconds,fiber_velocity};

//directed link identity, ordered (from,to) endpoint labels
pub(crate) type LinkKey = (String,String);

// a topology vertex
// successive stays empty until Topology::connect() wires it
#[derive(Clone,Debug)]
pub struct Endpoint {
    label:String,
    position:(f64,f64),
    connected_nodes:Vec<String>,
    successive:BTreeMap<String,LinkKey>,
}

impl Endpoint {
    pub(crate) fn new(label:String,position:(f64,f64),connected_nodes:Vec<String>) -> Self {
        Self {
            label,
            position,
            connected_nodes,
            successive:BTreeMap::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn position(&self) -> (f64,f64) {
        self.position
    }
    //neighbour labels as declared in the input, in declaration order
    pub fn connected_nodes(&self) -> &[String] {
        &self.connected_nodes
    }
    //neighbour label -> directed link key, populated by connect()
    pub fn successive(&self) -> &BTreeMap<String,LinkKey> {
        &self.successive
    }

    pub(crate) fn wire(&mut self,neighbour:String,link:LinkKey) {
        self.successive.insert(neighbour,link);
    }
}

// a directed fiber link
// A->B and B->A are distinct instances sharing one physical length
#[derive(Clone,Debug)]
pub struct Link {
    label:String,
    from:String,
    to:String,
    length:DistanceM,
    successive:BTreeMap<String,String>,
}

impl Link {
    pub(crate) fn new(from:String,to:String,length:DistanceM) -> Self {
        debug_assert!(length >= 0.0);
        Self {
            label:format!("{from}{to}"),
            from,
            to,
            length,
            successive:BTreeMap::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn endpoints(&self) -> (&str,&str) {
        (&self.from,&self.to)
    }
    pub fn length(&self) -> DistanceM {
        self.length
    }

    //both endpoint handles, registered by connect()
    pub(crate) fn wire(&mut self) {
        self.successive.insert(self.from.clone(),self.from.clone());
        self.successive.insert(self.to.clone(),self.to.clone());
    }
    pub(crate) fn is_wired(&self,endpoint:&str) -> bool {
        self.successive.contains_key(endpoint)
    }

    //propagation delay through fiber, unit in seconds
    pub fn latency_generation(&self) -> Seconds {
        self.length / *fiber_velocity
    }

    //ase noise picked up over this length at the given launch power, unit in watts
    pub fn noise_generation(&self,signal_power:PowerWatt) -> PowerWatt {
        ASE_COEFFICIENT*signal_power*self.length
    }

    //adds this link's contributions into the signal, power itself is untouched
    pub fn propagate(&self,signal:&mut SignalState) {
        signal.update_latency(self.latency_generation());
        signal.update_noise_power(self.noise_generation(signal.signal_power()));
    }
}

#[cfg(test)]
mod tests {
    use super::Link;
    use crate::optical_network::SignalState;

    #[test]
    fn test_latency_generation() {
        //3e8 meters at (2/3)c is roughly 1.5 seconds
        let link = Link::new("A".into(),"B".into(),3e8);
        assert!((link.latency_generation() - 1.5).abs() < 0.01);
    }

    #[test]
    fn test_noise_generation() {
        let link = Link::new("A".into(),"B".into(),3e8);
        assert!((link.noise_generation(1.0) - 0.3).abs() < 1e-12);
        //noise scales linearly with launch power
        assert!((link.noise_generation(0.5) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_propagate_accumulates_and_leaves_power_alone() {
        let link = Link::new("A".into(),"B".into(),1e5);
        let mut signal = SignalState::new(0.001,vec!["A".into(),"B".into()]);
        link.propagate(&mut signal);
        let (noise_once,latency_once) = (signal.noise_power(),signal.latency());
        assert!(noise_once > 0.0);
        assert!(latency_once > 0.0);
        link.propagate(&mut signal);
        assert!((signal.noise_power() - 2.0*noise_once).abs() < 1e-15);
        assert!((signal.latency() - 2.0*latency_once).abs() < 1e-12);
        assert_eq!(signal.signal_power(),0.001);
    }

    #[test]
    fn test_label_concatenation() {
        let link = Link::new("Rome".into(),"Turin".into(),1.0);
        assert_eq!(link.label(),"RomeTurin");
        assert_eq!(link.endpoints(),("Rome","Turin"));
    }
}
