use bytes::{Bytes, BytesMut};
use criterion::{Criterion, criterion_group, criterion_main};
use micro_kv_http::codec::{RequestDecoder, ResponseEncoder};
use micro_kv_http::connection::{ConnectionConfig, HttpConnection};
use micro_kv_http::handler::{Dispatcher, Lookup, Store, StoredValue};
use micro_kv_http::protocol::ResponseOutcome;
use std::hint::black_box;
use std::rc::Rc;
use tokio_util::codec::{Decoder, Encoder};

const REQUEST: &[u8] = b"GET /greeting HTTP/1.1\r\nHost: localhost\r\nUser-Agent: curl/7.79.1\r\nAccept: */*\r\n\r\n";

// Store answering every key with the same value
struct ConstStore;

impl Store for ConstStore {
    fn lookup(&self, _key: &[u8]) -> Lookup {
        Lookup::Found(StoredValue::Raw(Bytes::from_static(b"Hello World!")))
    }
}

fn bench_request_decoder(c: &mut Criterion) {
    c.bench_function("decode_simple_request", |b| {
        b.iter(|| {
            let mut decoder = RequestDecoder::new();
            let mut bytes = BytesMut::from(REQUEST);
            black_box(decoder.decode(&mut bytes).unwrap());
        });
    });
}

fn bench_response_encoder(c: &mut Criterion) {
    c.bench_function("encode_simple_response", |b| {
        b.iter(|| {
            let mut encoder = ResponseEncoder::new();
            let mut bytes = BytesMut::new();
            black_box(encoder.encode(ResponseOutcome::Ok(Bytes::from_static(b"Hello World!")), &mut bytes).unwrap());
        });
    });
}

fn bench_fragmented_connection(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(Rc::new(ConstStore));
    let config = ConnectionConfig::default();

    c.bench_function("process_fragmented_request", |b| {
        b.iter(|| {
            let mut connection = HttpConnection::new(&config, dispatcher.clone());
            let mut last = None;
            for piece in REQUEST.chunks(16) {
                last = Some(connection.on_bytes(piece).unwrap());
            }
            black_box(last);
        });
    });
}

criterion_group!(benches, bench_request_decoder, bench_response_encoder, bench_fragmented_connection);
criterion_main!(benches);
