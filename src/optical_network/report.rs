use super::network::Topology;
use super::signal::SignalState;
use super::{NetworkError,PowerWatt,Seconds,probe_power};

//one row of the all-pairs analysis
#[derive(Clone,Debug)]
pub struct PathRecord {
    pub path:Vec<String>,
    pub latency:Seconds,
    pub noise_power:PowerWatt,
    pub snr_db:f64,
}

impl PathRecord {
    pub fn path_string(&self) -> String {
        self.path.join("--")
    }
}

//a path whose probe failed, kept alongside the successful rows
#[derive(Debug)]
pub struct PathFailure {
    pub path:Vec<String>,
    pub error:NetworkError,
}

#[derive(Debug,Default)]
pub struct WeightedPaths {
    pub records:Vec<PathRecord>,
    pub failures:Vec<PathFailure>,
}

// probes every simple path between every ordered pair of distinct endpoints
// with a fresh canonical signal, one record per path in discovery order
// a failing path is collected, it never aborts the rest of the sweep
pub fn weighted_paths(topology:&Topology) -> WeightedPaths {
    let mut report = WeightedPaths::default();
    let labels:Vec<String> = topology.labels().cloned().collect();

    for start in &labels {
        for end in &labels {
            if start == end {
                continue;
            }
            let paths = match topology.find_paths(start,end) {
                Ok(paths) => paths,
                Err(error) => {
                    log::warn!("skipping pair {start}->{end}: {error}");
                    report.failures.push(PathFailure{
                        path:vec![start.to_string(),end.to_string()],
                        error,
                    });
                    continue;
                }
            };
            for path in paths {
                let probe = SignalState::new(*probe_power,path.clone());
                match topology.propagate(probe) {
                    Ok(signal) => report.records.push(PathRecord{
                        path,
                        latency:signal.latency(),
                        noise_power:signal.noise_power(),
                        snr_db:signal.snr_db(),
                    }),
                    Err(error) => {
                        log::warn!("probe failed along {}: {error}",path.join("--"));
                        report.failures.push(PathFailure{path,error});
                    }
                }
            }
        }
    }

    log::debug!("weighted paths: {} records, {} failures",
        report.records.len(),report.failures.len());
    report
}

#[cfg(test)]
mod tests {
    use super::weighted_paths;
    use crate::optical_network::{EndpointDescription,Topology,TopologyDescription};

    fn wired(entries:&[(&str,(f64,f64),&[&str])]) -> Topology {
        let description:TopologyDescription = entries.iter().map(|(label,position,neighbours)| {
            (label.to_string(),EndpointDescription{
                position:Some(*position),
                connected_nodes:neighbours.iter().map(|n| n.to_string()).collect(),
            })
        }).collect();
        let mut topology = Topology::from_description(description).unwrap();
        topology.connect();
        topology
    }

    #[test]
    fn test_square_report() {
        let topology = wired(&[
            ("A",(0.0,0.0),&["B","D"]),
            ("B",(0.0,1.0),&["A","C"]),
            ("C",(1.0,1.0),&["B","D"]),
            ("D",(1.0,0.0),&["A","C"]),
        ]);
        let report = weighted_paths(&topology);
        assert!(report.failures.is_empty());
        //each of the 12 ordered pairs has exactly two simple routes around the square
        assert_eq!(report.records.len(),24);
        for record in &report.records {
            assert!(record.latency > 0.0);
            assert!(record.noise_power > 0.0);
            assert!(record.snr_db.is_finite());
        }
        //pairs sweep in label order, the direct hop A->B is discovered first
        let first = &report.records[0];
        assert_eq!(first.path_string(),"A--B");
    }

    #[test]
    fn test_longer_route_has_lower_snr() {
        let topology = wired(&[
            ("A",(0.0,0.0),&["B","D"]),
            ("B",(0.0,1.0),&["A","C"]),
            ("C",(1.0,1.0),&["B","D"]),
            ("D",(1.0,0.0),&["A","C"]),
        ]);
        let report = weighted_paths(&topology);
        let direct = report.records.iter()
            .find(|r| r.path_string() == "A--B").unwrap();
        let detour = report.records.iter()
            .find(|r| r.path_string() == "A--D--C--B").unwrap();
        assert!(detour.latency > direct.latency);
        assert!(detour.snr_db < direct.snr_db);
    }

    #[test]
    fn test_zero_length_link_reports_infinite_snr() {
        //two co-located endpoints, the probe picks up no noise at all
        let topology = wired(&[
            ("A",(5.0,5.0),&["B"]),
            ("B",(5.0,5.0),&["A"]),
        ]);
        let report = weighted_paths(&topology);
        assert!(report.failures.is_empty());
        assert_eq!(report.records.len(),2);
        for record in &report.records {
            assert_eq!(record.noise_power,0.0);
            assert!(record.snr_db.is_infinite() && record.snr_db > 0.0);
        }
    }

    #[test]
    fn test_isolated_endpoint_yields_no_rows() {
        let topology = wired(&[
            ("A",(0.0,0.0),&["B"]),
            ("B",(1.0,0.0),&["A"]),
            ("C",(9.0,9.0),&[]),
        ]);
        let report = weighted_paths(&topology);
        assert!(report.failures.is_empty());
        //only A<->B is reachable, pairs touching C discover no path
        assert_eq!(report.records.len(),2);
        assert!(report.records.iter().all(|r| !r.path.contains(&"C".to_string())));
    }
}
