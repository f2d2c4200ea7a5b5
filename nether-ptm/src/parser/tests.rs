//! Tests for the parser module

#[cfg(test)]
mod tests {
    use nether_tracker::{IoStream, ModuleCapacity, NullSampleLoader, SampleCodec, TrackerModule};

    use crate::error::PtmError;
    use crate::parser::{PTM_SAMPLE_CODECS, PtmDecoder, parse_ptm};

    /// Header + order list + pointer table with no instruments or patterns
    fn bare_module(num_patterns: u16, num_orders: u16) -> Vec<u8> {
        let mut data = vec![0u8; crate::HEADER_SIZE];
        data[28] = 0x1A;
        data[29..31].copy_from_slice(&0x0203u16.to_le_bytes());
        data[32..34].copy_from_slice(&num_orders.to_le_bytes());
        data[36..38].copy_from_slice(&num_patterns.to_le_bytes());
        data[38..40].copy_from_slice(&4u16.to_le_bytes());
        data[44..48].copy_from_slice(b"PTMF");
        data
    }

    #[test]
    fn test_parse_invalid_magic() {
        let mut data = bare_module(0, 0);
        data[44..48].copy_from_slice(b"XXXX");
        let result = parse_ptm(&data);
        assert!(matches!(result, Err(PtmError::UnrecognizedFormat)));
    }

    #[test]
    fn test_parse_too_small() {
        let result = parse_ptm(b"PTM test");
        assert!(matches!(result, Err(PtmError::UnrecognizedFormat)));
    }

    #[test]
    fn test_parse_bare_module() {
        let module = parse_ptm(&bare_module(0, 0)).unwrap();
        assert!(module.patterns.is_empty());
        assert!(module.instruments.is_empty());
        assert_eq!(module.header.num_samples, 0);
        assert_eq!(module.header.panning.len(), 4);
    }

    #[test]
    fn test_order_capacity_checked() {
        let data = bare_module(0, 10);
        let mut module = TrackerModule::with_capacity(ModuleCapacity {
            orders: 8,
            ..Default::default()
        });
        let result = PtmDecoder::new().decode(
            &mut IoStream::from_slice(&data),
            &mut module,
            &mut NullSampleLoader,
        );
        assert!(matches!(
            result,
            Err(PtmError::CapacityExceeded {
                what: "orders",
                requested: 10,
                capacity: 8
            })
        ));
    }

    #[test]
    fn test_pattern_table_limit() {
        let data = bare_module(129, 0);
        let result = parse_ptm(&data);
        assert!(matches!(
            result,
            Err(PtmError::CapacityExceeded {
                what: "patterns",
                requested: 129,
                capacity: 128
            })
        ));
    }

    #[test]
    fn test_ptm_codecs() {
        assert_eq!(PTM_SAMPLE_CODECS.eight_bit, SampleCodec::Delta);
        assert_eq!(PTM_SAMPLE_CODECS.sixteen_bit, SampleCodec::PtmDelta);
    }

    #[test]
    fn test_decoder_identify() {
        let data = bare_module(0, 0);
        assert_eq!(PtmDecoder::new().identify(&data), Some("PTM"));
        assert_eq!(PtmDecoder::new().identify(&data[..40]), None);
    }
}
