pub mod car;
pub mod intersection;
pub mod street;
pub mod traffic_signaling_problem;
