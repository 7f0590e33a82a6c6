mod error {
    mod errors;
}
mod vcloud_client;
