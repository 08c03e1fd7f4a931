use std::collections::{BTreeMap,HashSet};

use serde::Deserialize;

use super::elements::{Endpoint,Link,LinkKey};
use super::signal::SignalState;
use super::{DistanceM,NetworkError,Result};

// parsed input shape, one entry per endpoint
// position stays optional at parse time so a missing one surfaces as
// a geometry error during construction instead of a parse failure
#[derive(Clone,Debug,Deserialize)]
pub struct EndpointDescription {
    #[serde(default)]
    pub position:Option<(f64,f64)>,
    pub connected_nodes:Vec<String>,
}

//endpoint label -> description, ordered so construction is deterministic
pub type TopologyDescription = BTreeMap<String,EndpointDescription>;

// owns every endpoint and link of one analysis run
// adjacency is immutable once connect() has wired it
#[derive(Clone,Debug)]
pub struct Topology {
    endpoints:BTreeMap<String,Endpoint>,
    links:BTreeMap<LinkKey,Link>,
}

fn euclidean_distance(a:(f64,f64),b:(f64,f64)) -> DistanceM {
    (b.0 - a.0).hypot(b.1 - a.1)
}

impl Topology {
    // one endpoint per entry, one directed link per declared (label,neighbour) pair
    // an undirected connection declared on both sides yields two link instances
    pub fn from_description(description:TopologyDescription) -> Result<Self> {
        let mut endpoints:BTreeMap<String,Endpoint> = BTreeMap::new();
        for (label,entry) in description {
            let Some((x,y)) = entry.position else {
                return Err(NetworkError::InvalidGeometry{label});
            };
            if !x.is_finite() || !y.is_finite() {
                return Err(NetworkError::InvalidGeometry{label});
            }
            endpoints.insert(label.clone(),Endpoint::new(label,(x,y),entry.connected_nodes));
        }

        let mut links:BTreeMap<LinkKey,Link> = BTreeMap::new();
        for endpoint in endpoints.values() {
            for neighbour in endpoint.connected_nodes() {
                let Some(other) = endpoints.get(neighbour) else {
                    return Err(NetworkError::MalformedTopology{
                        label:endpoint.label().to_owned(),
                        neighbour:neighbour.clone(),
                    });
                };
                let key:LinkKey = (endpoint.label().to_owned(),neighbour.clone());
                if links.contains_key(&key) {
                    continue;
                }
                let length = euclidean_distance(endpoint.position(),other.position());
                let link = Link::new(key.0.clone(),key.1.clone(),length);
                links.insert(key,link);
            }
        }

        Ok(Self{endpoints,links})
    }

    // wires adjacency both ways, link -> endpoint handles and endpoint -> link key
    // a link whose endpoints cannot both be resolved is left unwired, not an error
    pub fn connect(&mut self) {
        let keys:Vec<LinkKey> = self.links.keys().cloned().collect();
        for (from,to) in keys {
            if !self.endpoints.contains_key(&from) || !self.endpoints.contains_key(&to) {
                log::warn!("link {from}{to} references a missing endpoint, left unwired");
                continue;
            }
            if let Some(link) = self.links.get_mut(&(from.clone(),to.clone())) {
                link.wire();
            }
            if let Some(endpoint) = self.endpoints.get_mut(&from) {
                endpoint.wire(to.clone(),(from.clone(),to.clone()));
            }
        }
    }

    // every simple path from start to end, in adjacency iteration order
    pub fn find_paths(&self,start:&str,end:&str) -> Result<Vec<Vec<String>>> {
        for label in [start,end] {
            if !self.endpoints.contains_key(label) {
                return Err(NetworkError::UnknownEndpoint{label:label.to_owned()});
            }
        }
        let mut found = Vec::new();
        let mut visited:HashSet<String> = HashSet::new();
        let mut path = vec![start.to_owned()];
        visited.insert(start.to_owned());
        self.search(start,end,&mut visited,&mut path,&mut found);
        Ok(found)
    }

    fn search(&self,current:&str,target:&str,
        visited:&mut HashSet<String>,path:&mut Vec<String>,found:&mut Vec<Vec<String>>)
    {
        if current == target {
            found.push(path.clone());
            return;
        }
        let Some(endpoint) = self.endpoints.get(current) else {return};
        for neighbour in endpoint.successive().keys() {
            if visited.contains(neighbour) {
                continue;
            }
            //push, recurse, pop, so the neighbour stays eligible for sibling branches
            visited.insert(neighbour.clone());
            path.push(neighbour.clone());
            self.search(neighbour,target,visited,path,found);
            path.pop();
            visited.remove(neighbour);
        }
    }

    // folds the signal along its own route, one wired link per consecutive pair
    // a route of zero or one label is a no-op
    pub fn propagate(&self,mut signal:SignalState) -> Result<SignalState> {
        loop {
            let (from,to) = {
                let route = signal.path();
                if route.len() < 2 {
                    break;
                }
                (route[0].clone(),route[1].clone())
            };
            let link = self.links.get(&(from.clone(),to.clone()))
                .filter(|link| link.is_wired(&to))
                .ok_or(NetworkError::DisconnectedPath{from,to})?;
            link.propagate(&mut signal);
            signal.update_path();
        }
        Ok(signal)
    }

    pub fn endpoint(&self,label:&str) -> Option<&Endpoint> {
        self.endpoints.get(label)
    }
    pub fn link(&self,from:&str,to:&str) -> Option<&Link> {
        self.links.get(&(from.to_owned(),to.to_owned()))
    }
    //read access for external visualization
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.values()
    }
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }
    pub(crate) fn labels(&self) -> impl Iterator<Item = &String> {
        self.endpoints.keys()
    }
}

impl TryFrom<TopologyDescription> for Topology {
    type Error = NetworkError;
    fn try_from(value:TopologyDescription) -> Result<Self> {
        Self::from_description(value)
    }
}
