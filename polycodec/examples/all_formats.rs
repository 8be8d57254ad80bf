//
// Copyright 2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! # All Formats Demo
//!
//! Encodes one value with every format compiled into this build, picks the
//! format from a string the way a config file would, and shows the Avro
//! schema inferred for the type.
//!
//! Run with logging to see schema generation and cache hits:
//!
//! ```bash
//! RUST_LOG=polycodec=trace cargo run --example all_formats
//! ```

use chrono::{DateTime, Utc};
use polycodec::{AvroCodec, Codec, CodecType, Describe};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Describe)]
pub struct Shipment {
    #[codec(avro = "shipment_id")]
    pub id: String,
    pub weight_kg: f64,
    pub fragile: bool,
    pub dimensions: Vec<u32>,
    pub carrier: Option<String>,
    pub customs: BTreeMap<String, String>,
    pub label: Vec<u8>,
    pub shipped_at: DateTime<Utc>,
    pub destination: Destination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Describe)]
pub struct Destination {
    pub city: String,
    pub country: String,
}

fn shipment() -> Shipment {
    Shipment {
        id: "SHP-0001".into(),
        weight_kg: 12.75,
        fragile: true,
        dimensions: vec![40, 30, 20],
        carrier: Some("Parcel Co".into()),
        customs: BTreeMap::from([("hs_code".into(), "8471.30".into())]),
        label: b"ZPL^XA".to_vec(),
        shipped_at: DateTime::from_timestamp(1_717_200_000, 0).unwrap_or_default(),
        destination: Destination {
            city: "Oslo".into(),
            country: "NO".into(),
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let value = shipment();

    println!("=== Formats in this build ===");
    for codec_type in polycodec::supported_codecs() {
        if codec_type == CodecType::Protobuf {
            println!("{codec_type:>9}: requires a generated message type (see new_protobuf)");
            continue;
        }
        let codec = polycodec::new::<Shipment>(codec_type)?;
        let bytes = codec.marshal(&value)?;
        let decoded = codec.unmarshal(&bytes)?;
        assert_eq!(decoded, value);
        println!("{codec_type:>9}: {:>4} bytes, round trip ok", bytes.len());
    }

    println!();
    println!("=== Format chosen at runtime ===");
    let configured = std::env::var("SHIPMENT_FORMAT").unwrap_or_else(|_| "yaml".to_string());
    let codec_type: CodecType = configured.parse()?;
    let codec = polycodec::new::<Shipment>(codec_type)?;
    let mut stdout = std::io::stdout().lock();
    codec.encode(&mut stdout, &value)?;
    drop(stdout);
    println!();

    println!("=== Inferred Avro schema ===");
    let avro = AvroCodec::<Shipment>::new();
    println!("{}", avro.schema_text());

    println!();
    println!("=== Unsupported format ===");
    match polycodec::new::<Shipment>(CodecType::Protobuf) {
        Ok(_) => println!("unexpected: protobuf through the generic factory"),
        Err(error) => println!("{error}"),
    }

    Ok(())
}
