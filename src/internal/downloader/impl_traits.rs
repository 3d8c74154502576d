pub mod sha256_checksum;
