fn main() {
    if let Err(err) = shadow_rs::ShadowBuilder::builder().build() {
        panic!("Failed to generate build information, error: {err}");
    }
}
