fn main() {
    // Only the ESP-IDF demo binary needs the IDF build environment.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
