fn main() {
    // Grava os metadados de build expostos pelo endpoint /health
    built::write_built_file().expect("Falha ao gravar informações de build");
}
