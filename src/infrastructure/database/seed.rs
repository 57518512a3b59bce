//! The shipped product catalog
//!
//! Loaded on first start and by the `load-products` subcommand; also the
//! recovery source when the persisted catalog cannot be read. Prices are in
//! the base currency.

use crate::domain::entities::ProductSeed;

pub const PRODUCT_SEED: &[ProductSeed] = &[
    // Streaming
    ProductSeed {
        name: "Netflix Premium",
        category: "streaming",
        price: 1800.0,
        description: "Cuenta completa, 4K, 4 pantallas",
        delivery_info: "Entrega por privado en menos de 24h",
    },
    ProductSeed {
        name: "HBO Max Platino",
        category: "streaming",
        price: 1150.0,
        description: "Plan Platino, sin anuncios",
        delivery_info: "Entrega por privado en menos de 24h",
    },
    ProductSeed {
        name: "Disney+",
        category: "streaming",
        price: 1600.0,
        description: "Catálogo completo Disney, Pixar y Marvel",
        delivery_info: "Entrega por privado en menos de 24h",
    },
    ProductSeed {
        name: "Prime Video",
        category: "streaming",
        price: 1000.0,
        description: "Amazon Prime Video, perfil propio",
        delivery_info: "Entrega por privado en menos de 24h",
    },
    ProductSeed {
        name: "Crunchyroll",
        category: "streaming",
        price: 800.0,
        description: "Anime sin anuncios, simulcast",
        delivery_info: "Entrega por privado en menos de 24h",
    },
    // Música
    ProductSeed {
        name: "Apple Music",
        category: "music",
        price: 800.0,
        description: "Suscripción individual, un mes",
        delivery_info: "Entrega por privado en menos de 24h",
    },
    // VPN
    ProductSeed {
        name: "Surfshark VPN",
        category: "vpn",
        price: 600.0,
        description: "Un dispositivo, un mes",
        delivery_info: "Credenciales por privado",
    },
    ProductSeed {
        name: "NordVPN",
        category: "vpn",
        price: 600.0,
        description: "Un dispositivo, un mes",
        delivery_info: "Credenciales por privado",
    },
    ProductSeed {
        name: "PIA VPN",
        category: "vpn",
        price: 600.0,
        description: "Private Internet Access, un mes",
        delivery_info: "Credenciales por privado",
    },
    ProductSeed {
        name: "Surfshark 2 Dispositivos",
        category: "vpn",
        price: 900.0,
        description: "Dos dispositivos, un mes",
        delivery_info: "Credenciales por privado",
    },
    // Herramientas
    ProductSeed {
        name: "Canva Pro",
        category: "tools",
        price: 4600.0,
        description: "Plan Pro anual",
        delivery_info: "Invitación al equipo por privado",
    },
    ProductSeed {
        name: "Discord Básico",
        category: "tools",
        price: 3000.0,
        description: "Nitro Basic, un mes",
        delivery_info: "Regalo por privado",
    },
    ProductSeed {
        name: "Discord Nitro",
        category: "tools",
        price: 5000.0,
        description: "Nitro completo, un mes",
        delivery_info: "Regalo por privado",
    },
    ProductSeed {
        name: "Adobe CC (2 devices)",
        category: "tools",
        price: 7500.0,
        description: "Creative Cloud completo, dos dispositivos",
        delivery_info: "Credenciales por privado",
    },
    // Licencias
    ProductSeed {
        name: "Windows 10/11 Pro",
        category: "licenses",
        price: 2500.0,
        description: "Licencia digital permanente",
        delivery_info: "Clave por privado",
    },
    ProductSeed {
        name: "Office 365 + Copilot",
        category: "licenses",
        price: 3500.0,
        description: "Suscripción anual con Copilot",
        delivery_info: "Cuenta por privado",
    },
    ProductSeed {
        name: "Xbox Game Pass",
        category: "licenses",
        price: 5000.0,
        description: "Game Pass Ultimate, un mes",
        delivery_info: "Clave por privado",
    },
];
