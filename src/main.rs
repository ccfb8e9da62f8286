fn main() -> anyhow::Result<()> {
    moodquest_lib::run()
}
