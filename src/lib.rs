pub mod optical_network;
