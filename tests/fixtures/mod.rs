//! Shared XMP packets for integration tests

#![allow(dead_code)]

/// RDF body of a typical photo editor packet
pub const PHOTO_RDF: &str = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/" x:xmptk="Test Toolkit 1.0">
  <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
    <rdf:Description rdf:about=""
        xmlns:xmp="http://ns.adobe.com/xap/1.0/"
        xmlns:dc="http://purl.org/dc/elements/1.1/"
        xmlns:xmpMM="http://ns.adobe.com/xap/1.0/mm/"
        xmlns:stRef="http://ns.adobe.com/xap/1.0/sType/ResourceRef#"
        xmlns:stEvt="http://ns.adobe.com/xap/1.0/sType/ResourceEvent#"
        xmlns:xmpRights="http://ns.adobe.com/xap/1.0/rights/"
        xmlns:photoshop="http://ns.adobe.com/photoshop/1.0/"
        xmlns:pdf="http://ns.adobe.com/pdf/1.3/"
        xmp:CreatorTool="Adobe Photoshop CS2 Windows"
        xmp:CreateDate="2006-04-25T15:32:01+02:00"
        xmp:ModifyDate="2006-04-27T15:38:36.655+02:00"
        xmpMM:DocumentID="uuid:FE607D9B5FD4DA118B7787757E22306B"
        xmpRights:Marked="True"
        photoshop:ColorMode="3"
        pdf:Trapped="False">
      <xmp:Label>Final</xmp:Label>
      <dc:format>image/jpeg</dc:format>
      <dc:title>
        <rdf:Alt>
          <rdf:li xml:lang="x-default">Purple Square</rdf:li>
          <rdf:li xml:lang="de">Lila Quadrat</rdf:li>
        </rdf:Alt>
      </dc:title>
      <dc:creator>
        <rdf:Seq>
          <rdf:li>Llywelyn</rdf:li>
          <rdf:li>Stefan</rdf:li>
        </rdf:Seq>
      </dc:creator>
      <dc:subject>
        <rdf:Bag>
          <rdf:li>purple</rdf:li>
          <rdf:li>square</rdf:li>
        </rdf:Bag>
      </dc:subject>
      <xmpMM:DerivedFrom rdf:parseType="Resource">
        <stRef:instanceID>xmp.iid:01</stRef:instanceID>
        <stRef:documentID>xmp.did:01</stRef:documentID>
      </xmpMM:DerivedFrom>
      <xmpMM:History>
        <rdf:Seq>
          <rdf:li stEvt:action="created" stEvt:instanceID="xmp.iid:01"
              stEvt:softwareAgent="Adobe Photoshop CS2 Windows"/>
          <rdf:li rdf:parseType="Resource">
            <stEvt:action>saved</stEvt:action>
            <stEvt:instanceID>xmp.iid:02</stEvt:instanceID>
            <stEvt:changed>/</stEvt:changed>
          </rdf:li>
        </rdf:Seq>
      </xmpMM:History>
    </rdf:Description>
  </rdf:RDF>
</x:xmpmeta>"#;

/// Number of leaf values in [`PHOTO_RDF`]
pub const PHOTO_LEAVES: usize = 15;

/// [`PHOTO_RDF`] inside an `xpacket` wrapper announcing UTF-8
pub fn photo_packet() -> String {
    format!(
        "<?xpacket begin=\"\u{FEFF}\" id=\"W5M0MpCehiHzreSzNTczkc9d\"?>\n{}\n<?xpacket end=\"w\"?>",
        PHOTO_RDF
    )
}

pub fn init_logger() {
    _ = env_logger::builder().is_test(true).try_init();
}
