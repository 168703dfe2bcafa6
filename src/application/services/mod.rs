pub mod destination_provisioner;

pub use destination_provisioner::DestinationProvisioner;
